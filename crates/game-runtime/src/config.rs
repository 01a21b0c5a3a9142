use std::io::Read;

/// Runtime configuration, read from a TOML file.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// RNG seed; a random one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub spawn: Spawn,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Spawn {
    /// Probability in [0, 1] that a spawned tile is a 4 rather than a 2.
    /// The default keeps the even split.
    #[serde(default = "defaults::four_chance")]
    pub four_chance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            spawn: Spawn::default(),
        }
    }
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            four_chance: defaults::four_chance(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn four_chance() -> f64 {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.spawn.four_chance, 0.5);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            seed = 42

            [spawn]
            four_chance = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.spawn.four_chance, 0.1);
    }
}
