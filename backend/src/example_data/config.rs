//! Example data configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling example student seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Seed the demo students on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Optional fixture file replacing the bundled demo students.
    pub fixture_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Whether seeding should run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Configured fixture override, if any.
    pub fn fixture_path(&self) -> Option<&PathBuf> {
        self.fixture_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ExampleDataSettings {
        ExampleDataSettings::load_from_iter([OsString::from("student-records")])
            .expect("config should load")
    }

    #[rstest]
    fn seeding_is_disabled_by_default() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", None::<String>),
            ("EXAMPLE_DATA_FIXTURE_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.is_enabled());
        assert!(settings.fixture_path().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            (
                "EXAMPLE_DATA_FIXTURE_PATH",
                Some("/tmp/students.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.is_enabled());
        assert_eq!(
            settings.fixture_path(),
            Some(&PathBuf::from("/tmp/students.json"))
        );
    }
}
