use crate::Result;

pub use safer_index_core::driver::{
    operation::{self, Operation},
    Connection, Response, Row, Rows,
};

use safer_index_core::Error;
use url::Url;

/// Opens a connection for `url`, picking the driver from the URL scheme.
///
/// `alias` is the name routers see for this database.
pub async fn connect(url: &str, alias: &str) -> Result<Box<dyn Connection>> {
    let parsed = Url::parse(url).map_err(|e| Error::invalid_connection_url(e.to_string()))?;

    match parsed.scheme() {
        "postgresql" | "postgres" => connect_postgresql(url, alias).await,
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}"
        ))),
    }
}

#[cfg(feature = "postgresql")]
async fn connect_postgresql(url: &str, alias: &str) -> Result<Box<dyn Connection>> {
    let driver = safer_index_driver_postgresql::PostgreSQL::connect(url)
        .await?
        .with_alias(alias);
    Ok(Box::new(driver))
}

#[cfg(not(feature = "postgresql"))]
async fn connect_postgresql(_url: &str, _alias: &str) -> Result<Box<dyn Connection>> {
    Err(crate::err!("`postgresql` feature not enabled"))
}

#[cfg(feature = "postgresql")]
pub use safer_index_driver_postgresql::redact_url_password;
