//! One-shot hardware peripheral initialization.
//!
//! Configures the two ADC1 channels and the LEDC timer/channel that drives
//! the buzzer, using raw ESP-IDF sys calls.  Called once from `main()`
//! before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("ADC1"),
            HwInitError::LedcInitFailed(_) => Self::Init("LEDC"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    // 12 dB attenuation: full 0 – 3.3 V swing maps to 0 – 4095.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::MOISTURE_ADC_CHANNEL, pins::LIGHT_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!(
        "hw_init: ADC1 configured (CH{}/GPIO{}=moisture, CH{}/GPIO{}=light)",
        pins::MOISTURE_ADC_CHANNEL,
        pins::MOISTURE_ADC_GPIO,
        pins::LIGHT_ADC_CHANNEL,
        pins::LIGHT_ADC_GPIO
    );
    Ok(())
}

/// Raw 12-bit reading, or 0 if the read fails.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

// ── LEDC tone output ─────────────────────────────────────────

/// Timer backing the tone channel.  Its frequency is retuned per note.
#[cfg(target_os = "espidf")]
const TONE_TIMER: ledc_timer_t = ledc_timer_t_LEDC_TIMER_0;
/// Timer frequency before the first note.
#[cfg(target_os = "espidf")]
const TONE_IDLE_FREQ_HZ: u32 = 1_000;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: TONE_TIMER,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: TONE_IDLE_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    // Start silent: duty 0.
    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: pins::TONE_LEDC_CHANNEL,
        timer_sel: TONE_TIMER,
        gpio_num: pins::BUZZER_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    info!(
        "hw_init: LEDC configured (tone=CH{} on GPIO{}, {}-bit)",
        pins::TONE_LEDC_CHANNEL,
        pins::BUZZER_GPIO,
        pins::PWM_RESOLUTION_BITS
    );
    Ok(())
}

/// Drive the buzzer at `frequency_hz` with a 50% square wave, or silence
/// it when `frequency_hz` is 0.
#[cfg(target_os = "espidf")]
pub fn ledc_tone(frequency_hz: u16) {
    // SAFETY: LEDC timer and channel were configured in init_ledc(); only
    // the main loop calls this function.
    unsafe {
        if frequency_hz > 0 {
            ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, TONE_TIMER, u32::from(frequency_hz));
        }
        let duty = if frequency_hz > 0 { pins::TONE_DUTY } else { 0 };
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::TONE_LEDC_CHANNEL, duty);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::TONE_LEDC_CHANNEL);
    }
}

// ── Host simulation ───────────────────────────────────────────

/// No PWM on host; `BuzzerDriver` keeps the state tests inspect.
#[cfg(not(target_os = "espidf"))]
pub fn ledc_tone(frequency_hz: u16) {
    log::trace!("hw_init(sim): tone {} Hz", frequency_hz);
}
