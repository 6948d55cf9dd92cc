use serde_json;
use validator::Validate;

use super::error::*;
use config;

pub const SANDBOX_HOST: &str = "https://sandbox.payture.com";
pub const DEFAULT_MERCHANT: &str = "Merchant";
pub const DEFAULT_RETURN_URL: &str = "http://example.com?orderid={orderid}&result={success}";
pub const DEFAULT_CHEQUE_CONTACT_EMAIL: &str = "web@example.com";
pub const DEFAULT_WIDGET_HOST: &str = "https://merchantgateway.payture.com";
/// `2` is the test widget domain, use `1` in production
pub const DEFAULT_WIDGET_DOMAIN: &str = "2";

/// Gateway account settings, immutable once built.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Config {
    #[validate(url)]
    host: String,
    #[validate(length(min = "1"))]
    merchant: String,
    #[validate(length(min = "1"))]
    return_url: String,
    #[validate(email)]
    cheque_contact_email: String,
    #[validate(url)]
    widget_host: String,
    #[validate(length(min = "1"))]
    widget_domain: String,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Gateway host without a trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Merchant account, sent as `Key`
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Where customers land after paying. `{orderid}` and `{success}` are filled in by the gateway.
    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn cheque_contact_email(&self) -> &str {
        &self.cheque_contact_email
    }

    pub fn widget_host(&self) -> &str {
        &self.widget_host
    }

    pub fn widget_domain(&self) -> &str {
        &self.widget_domain
    }
}

/// Sandbox account
impl Default for Config {
    fn default() -> Self {
        Config {
            host: SANDBOX_HOST.to_string(),
            merchant: DEFAULT_MERCHANT.to_string(),
            return_url: DEFAULT_RETURN_URL.to_string(),
            cheque_contact_email: DEFAULT_CHEQUE_CONTACT_EMAIL.to_string(),
            widget_host: DEFAULT_WIDGET_HOST.to_string(),
            widget_domain: DEFAULT_WIDGET_DOMAIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    host: Option<String>,
    merchant: Option<String>,
    return_url: Option<String>,
    cheque_contact_email: Option<String>,
    widget_host: Option<String>,
    widget_domain: Option<String>,
}

impl ConfigBuilder {
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn merchant<S: Into<String>>(mut self, merchant: S) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn return_url<S: Into<String>>(mut self, return_url: S) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn cheque_contact_email<S: Into<String>>(mut self, email: S) -> Self {
        self.cheque_contact_email = Some(email.into());
        self
    }

    pub fn widget_host<S: Into<String>>(mut self, widget_host: S) -> Self {
        self.widget_host = Some(widget_host.into());
        self
    }

    pub fn widget_domain<S: Into<String>>(mut self, widget_domain: S) -> Self {
        self.widget_domain = Some(widget_domain.into());
        self
    }

    /// Fills in sandbox defaults for missing fields and validates the result
    pub fn build(self) -> Result<Config, Error> {
        let ConfigBuilder {
            host,
            merchant,
            return_url,
            cheque_contact_email,
            widget_host,
            widget_domain,
        } = self;
        let defaults = Config::default();

        let config = Config {
            host: host.map(|host| host.trim_end_matches('/').to_string()).unwrap_or(defaults.host),
            merchant: merchant.unwrap_or(defaults.merchant),
            return_url: return_url.unwrap_or(defaults.return_url),
            cheque_contact_email: cheque_contact_email.unwrap_or(defaults.cheque_contact_email),
            widget_host: widget_host.unwrap_or(defaults.widget_host),
            widget_domain: widget_domain.unwrap_or(defaults.widget_domain),
        };

        if let Err(errors) = config.validate() {
            warn!("Invalid payture config {:?}: {:?}", config, errors);
            return Err(ErrorKind::InvalidConfig(serde_json::to_value(errors).unwrap_or_default()).into());
        }

        Ok(config)
    }
}

impl From<config::Payture> for ConfigBuilder {
    fn from(config: config::Payture) -> Self {
        let config::Payture {
            host,
            merchant,
            return_url,
            cheque_contact_email,
            widget_host,
            widget_domain,
        } = config;
        ConfigBuilder {
            host,
            merchant,
            return_url,
            cheque_contact_email,
            widget_host,
            widget_domain,
        }
    }
}
