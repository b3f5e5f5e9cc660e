use anyhow::{bail, Result};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Response, StatusCode};

use crate::api::*;

pub struct Client {
    host: String,
    client: reqwest::Client,
}
impl Client {
    /// Builds a client with the headers the platform requires and a cookie
    /// store, so the session opened by [`Client::login`] rides along on every
    /// following request. The platform may rotate cookie names and contents
    /// at any time, which is why all calls go through this one client.
    pub fn new(host: String) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("X-ESA-API-Key", HeaderValue::from_static("ROBOT"));
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;
        Ok(Self { host, client })
    }
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let request = LoginRequest::standard(username, password);
        let response = self
            .client
            .post(self.host.clone() + "/api/v1/sessions")
            .json(&request)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            bail!(
                "Authentication failed: {}: {}",
                response.status(),
                response.text().await?
            );
        }
        debug!("Logged in as {}", username);
        Ok(())
    }
    pub async fn account_balance(&self) -> Result<CashBalance> {
        let response = self
            .client
            .get(self.host.clone() + "/api/latest/players/self/account")
            .send()
            .await?;
        let response = bail_if_err(response).await?;
        Ok(response.json::<AccountResponse>().await?.balances.cash)
    }
    pub async fn list_draws(&self, game: Game) -> Result<Vec<Draw>> {
        let response = self
            .client
            .get(format!(
                "{}/api/v1/sport-games/draws?game-names={}",
                self.host, game
            ))
            .send()
            .await?;
        let response = bail_if_err(response).await?;
        Ok(response.json::<DrawsResponse>().await?.draws)
    }
    /// Submits a basket of wagers in one request and returns the per-wager
    /// results in basket order.
    pub async fn place_wagers(&self, basket: &[WagerRequest]) -> Result<Vec<PlacedWager>> {
        let response = self
            .client
            .post(self.host.clone() + "/api/v1/sport-games/wagers")
            .json(&basket)
            .send()
            .await?;
        let response = bail_if_err(response).await?;
        Ok(response.json::<Vec<PlacedWager>>().await?)
    }
    pub async fn winshares(
        &self,
        request: &WinshareRequest,
        list_index: u32,
    ) -> Result<Vec<Winshare>> {
        let response = self
            .client
            .post(format!(
                "{}/api/v1/sport-games/draws/{}/{}/winshares",
                self.host, request.game, list_index
            ))
            .json(&request)
            .send()
            .await?;
        let response = bail_if_err(response).await?;
        Ok(response.json::<WinshareListResponse>().await?.win_shares)
    }
}
async fn bail_if_err(response: Response) -> Result<Response> {
    if response.status() != StatusCode::OK {
        bail!("{}: {}", response.status(), response.text().await?)
    }
    Ok(response)
}
