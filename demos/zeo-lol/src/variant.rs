use inkfield::EffectConfig;

/// Colour-sampled particles, 1px points everywhere, secret phrase on start-up.
pub fn config() -> EffectConfig {
    EffectConfig::default()
        .with_use_color(true)
        .with_point_size(1.0, 1.0)
        .with_creature(false)
}
