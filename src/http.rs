use log::debug;
use once_cell::sync::OnceCell;
use reqwest::header;
use url::Url;

use crate::error::{Error, Result};

static HTTP_CLIENT: OnceCell<reqwest::blocking::Client> = OnceCell::new();

/// Build the shared client, optionally routed through `proxy`.
///
/// Must run before the first request; a second call is an error.
pub fn init_client(proxy: Option<&str>) -> Result<()> {
    let mut builder = reqwest::blocking::Client::builder().gzip(true);

    if let Some(proxy) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    let client = builder.build()?;
    HTTP_CLIENT
        .set(client)
        .map_err(|_| Error::InvalidInput("http client already initialized".to_string()))
}

fn client() -> Result<&'static reqwest::blocking::Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::blocking::Client::builder()
            .gzip(true)
            .build()
            .map_err(Error::from)
    })
}

pub fn simple_http_get(url: &Url) -> Result<String> {
    debug!("GET {}", url);
    let resp = client()?
        .get(url.as_str())
        .header(header::ACCEPT, "text/vtt,application/x-subrip,text/plain,application/json;q=0.9,*/*;q=0.8")
        .header(header::ACCEPT_ENCODING, "gzip")
        .header(header::USER_AGENT, concat!("subtrack/", env!("CARGO_PKG_VERSION")))
        .send()?;

    let status = resp.status();
    if status.is_success() {
        Ok(resp.text()?)
    } else {
        Err(Error::Status {
            url: resp.url().to_string(),
            status: status.as_u16(),
        })
    }
}
