use std::collections::HashSet;
use std::env::var;
use std::path::PathBuf;

pub struct Config {
    /// Origin of the backend API.
    pub api_url: String,
    /// `client` value sent along with login requests.
    pub client_id: String,
    /// Where the bearer token is persisted between runs.
    pub token_file: PathBuf,
    pub proxy: Option<ProxyConfig>,
}

impl Config {
    pub fn proxy(&self) -> Option<&reqwest::Proxy> {
        self.proxy.as_ref().map(|p| &p.proxy)
    }
}

pub struct ProxyConfig {
    pub url: reqwest::Url,
    pub only_domains: Option<HashSet<String>>,
    pub proxy: reqwest::Proxy,
}

fn get_proxy_config() -> Option<ProxyConfig> {
    let url: reqwest::Url = var("PROXY_URL").ok()?.parse().expect("Invalid PROXY_URL");
    let proxy_url = url.clone();
    let only_domains: Option<HashSet<String>> = var("PROXY_DOMAINS")
        .ok()
        .map(|ods| ods.split(',').map(str::to_owned).collect());
    let proxy = if let Some(ref only_domains) = only_domains {
        let only_domains = only_domains.clone();
        reqwest::Proxy::custom(move |url| {
            if let Some(domain) = url.domain() {
                if only_domains.contains(domain)
                    || only_domains
                        .iter()
                        .any(|target| domain.ends_with(&format!(".{}", target)))
                {
                    Some(proxy_url.clone())
                } else {
                    None
                }
            } else {
                None
            }
        })
    } else {
        reqwest::Proxy::all(proxy_url).expect("Invalid PROXY_URL")
    };
    Some(ProxyConfig {
        url,
        only_domains,
        proxy,
    })
}

fn default_token_file() -> PathBuf {
    let home = var("HOME").unwrap_or_else(|_| ".".to_owned());
    PathBuf::from(home).join(".config").join("quill").join("token")
}

lazy_static! {
    pub static ref CONFIG: Config = Config {
        api_url: var("QUILL_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned()),
        client_id: var("QUILL_CLIENT_ID").unwrap_or_else(|_| "blog_app".to_owned()),
        token_file: var("QUILL_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_file()),
        proxy: get_proxy_config(),
    };
}
