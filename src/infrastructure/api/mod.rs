pub mod http;

use std::sync::Arc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiBox;

pub struct ApiManager {}

impl ApiManager {
    pub fn get() -> ApiBox {
        return Arc::new(http::HttpApi::new(Config::get(ConfigKey::ApiURL)));
    }
}
