//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# posttable configuration
#
# Environment variables override these values:
#   POSTTABLE_API_URL, POSTTABLE_ENDPOINT, POSTTABLE_PAGE_SIZE,
#   POSTTABLE_EXPORT_DIR, POSTTABLE_THEME, POSTTABLE_DEMO=1

# Base URL of the record API
api_url = "{api_url}"

# Path fetched once at startup; must return a JSON array of {{id, title, body}}
endpoint = "{endpoint}"

# Rows per page
page_size = {page_size}

# HTTP request timeout in seconds
request_timeout_secs = {timeout}

# Directory for pagina_atual.xlsx / todos_os_itens.xlsx
export_dir = "{export_dir}"

# Theme: dark, light, terminal
theme = "{theme}"

# ─────────────────────────────────────────────────────────────────────────────
# LOGGING
# ─────────────────────────────────────────────────────────────────────────────
# RUST_LOG env var overrides the level.

[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_rotation = "{file_rotation}"  # hourly, daily, never
file_prefix = "{file_prefix}"
"#,
            api_url = escape(&self.api_url),
            endpoint = escape(&self.endpoint),
            page_size = self.page_size,
            timeout = self.request_timeout_secs,
            export_dir = escape(&self.export_dir.display().to_string()),
            theme = escape(&self.theme),
            level = escape(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = escape(&self.logging.file_dir.display().to_string()),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = escape(&self.logging.file_prefix),
        )
    }
}

/// Escape a value for a TOML basic string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
