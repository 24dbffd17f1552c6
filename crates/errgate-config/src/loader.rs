use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is invalid (including an unknown code strategy or
    /// status code), or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if an override table has an empty key or value, or
    /// the catalog settings are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_overrides()?;
        self.validate_catalog()?;
        Ok(())
    }

    fn validate_overrides(&self) -> anyhow::Result<()> {
        for (table, entries) in [("codes", &self.codes), ("messages", &self.messages)] {
            for (key, value) in entries {
                if key.trim().is_empty() {
                    anyhow::bail!("{table} contains an empty key");
                }
                if table == "codes" && value.trim().is_empty() {
                    anyhow::bail!("codes.\"{key}\" must not be empty");
                }
            }
        }

        if let Some(key) = self.http_statuses.keys().find(|key| key.trim().is_empty()) {
            anyhow::bail!("http_statuses contains an empty key: \"{key}\"");
        }

        Ok(())
    }

    fn validate_catalog(&self) -> anyhow::Result<()> {
        let Some(ref catalog) = self.catalog else {
            return Ok(());
        };

        if catalog.basename.is_empty() || catalog.basename.contains(['/', '\\']) {
            anyhow::bail!("catalog.basename must be a plain file stem, got \"{}\"", catalog.basename);
        }

        if catalog.default_locale.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("catalog.default_locale must not be empty");
        }

        Ok(())
    }
}
