use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Web サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// `.env` と環境変数 (`HOST`, `PORT`) から読み込む
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_vars(env::var("HOST").ok(), env::var("PORT").ok())
    }

    /// 値がない、または読めない場合はデフォルト
    pub fn from_vars(host: Option<String>, port: Option<String>) -> Self {
        Self {
            host: host
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_vars(None, None);
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_values() {
        let config = Config::from_vars(Some("127.0.0.1".into()), Some("3000".into()));
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(Config::from_vars(None, Some("http".into())).port, DEFAULT_PORT);
        assert_eq!(Config::from_vars(None, Some("70000".into())).port, DEFAULT_PORT);
        assert_eq!(Config::from_vars(Some(" ".into()), None).host, DEFAULT_HOST);
    }
}
