use inkfield::EffectConfig;

/// Worm page: bigger points on phones and a worm with food.
pub fn config() -> EffectConfig {
    EffectConfig::default()
        .with_point_size(1.0, 3.0)
        .with_creature(true)
}
