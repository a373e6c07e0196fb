use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::ground_stations::GroundStationCfg;
use crate::leop::{LeopCfg, LeopGroundStations, Message};
use crate::methods;
use crate::slots::PassSlot;
use crate::spacecraft::{GroundTrackPoint, SpacecraftCfg};

#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    method: &'static str,
    params: Vec<Value>,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default, deserialize_with = "deserialize_present")]
    result: Option<Value>,
    error: Option<RpcError>,
}

/// Keeps an explicit `"result": null` distinct from a missing result field.
/// A server answering `null` where a record list belongs is an error the
/// caller has to see, not an empty listing.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    <Value as serde::Deserialize>::deserialize(deserializer).map(Some)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(Error::from)
}

/// Client for the SATNet JSON-RPC services.
///
/// All remote procedures are published under one HTTP endpoint; requests
/// address them through the short service names of [`crate::methods`].
pub struct Client {
    http: reqwest::blocking::Client,
    endpoint: String,
    credentials: Option<(String, String)>,
    next_id: u64,
}

impl Client {
    pub fn new(endpoint: &str) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder().build()?;

        Ok(Client {
            http,
            endpoint: endpoint.to_string(),
            credentials: None,
            next_id: 0,
        })
    }

    pub fn with_credentials(endpoint: &str, username: &str, password: &str) -> Result<Self, Error> {
        let mut client = Client::new(endpoint)?;
        client.credentials = Some((username.to_string(), password.to_string()));
        Ok(client)
    }

    /// Calls a service by its short name and hands back the raw result.
    ///
    /// The name is resolved against the service table before the request is
    /// built, so an unknown name fails without touching the network. A
    /// JSON-RPC error object becomes [`Error::Remote`] with the code and
    /// message the server sent.
    pub fn rcall(&mut self, service: &str, params: Vec<Value>) -> Result<Value, Error> {
        let method = methods::resolve(service)?;

        self.next_id += 1;
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id,
        };

        let mut call = self.http.post(&self.endpoint).json(&request);
        if let Some((username, password)) = &self.credentials {
            call = call.basic_auth(username, Some(password));
        }

        let response: RpcResponse = call.send()?.error_for_status()?.json()?;

        if let Some(error) = response.error {
            return Err(Error::Remote {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or(Error::NoResult)
    }

    pub fn gs_list(&mut self) -> Result<Vec<String>, Error> {
        decode(self.rcall("gs.list", vec![])?)
    }

    pub fn gs_get(&mut self, identifier: &str) -> Result<GroundStationCfg, Error> {
        decode(self.rcall("gs.get", vec![identifier.into()])?)
    }

    /// Creates a ground station and returns the identifier the server
    /// assigned to it.
    pub fn gs_add(&mut self, cfg: &GroundStationCfg) -> Result<String, Error> {
        decode(self.rcall("gs.add", vec![serde_json::to_value(cfg)?])?)
    }

    pub fn gs_update(&mut self, identifier: &str, cfg: &GroundStationCfg) -> Result<String, Error> {
        decode(self.rcall("gs.update", vec![identifier.into(), serde_json::to_value(cfg)?])?)
    }

    pub fn gs_delete(&mut self, identifier: &str) -> Result<String, Error> {
        decode(self.rcall("gs.delete", vec![identifier.into()])?)
    }

    pub fn gs_passes(&mut self, identifier: &str) -> Result<Vec<PassSlot>, Error> {
        decode(self.rcall("gs.getPasses", vec![identifier.into()])?)
    }

    /// Lists all ground stations and fetches the configuration of each one.
    pub fn gs_all(&mut self) -> Result<Vec<GroundStationCfg>, Error> {
        let identifiers = self.gs_list()?;
        identifiers
            .iter()
            .map(|identifier| self.gs_get(identifier))
            .collect()
    }

    pub fn sc_list(&mut self) -> Result<Vec<String>, Error> {
        decode(self.rcall("sc.list", vec![])?)
    }

    pub fn sc_get(&mut self, identifier: &str) -> Result<SpacecraftCfg, Error> {
        decode(self.rcall("sc.get", vec![identifier.into()])?)
    }

    pub fn sc_add(&mut self, cfg: &SpacecraftCfg) -> Result<String, Error> {
        decode(self.rcall("sc.add", vec![serde_json::to_value(cfg)?])?)
    }

    pub fn sc_update(&mut self, identifier: &str, cfg: &SpacecraftCfg) -> Result<String, Error> {
        decode(self.rcall("sc.update", vec![identifier.into(), serde_json::to_value(cfg)?])?)
    }

    pub fn sc_delete(&mut self, identifier: &str) -> Result<String, Error> {
        decode(self.rcall("sc.delete", vec![identifier.into()])?)
    }

    pub fn sc_passes(&mut self, identifier: &str) -> Result<Vec<PassSlot>, Error> {
        decode(self.rcall("sc.getPasses", vec![identifier.into()])?)
    }

    pub fn sc_ground_track(&mut self, identifier: &str) -> Result<Vec<GroundTrackPoint>, Error> {
        decode(self.rcall("sc.getGroundtrack", vec![identifier.into()])?)
    }

    /// Lists all spacecraft and fetches the configuration of each one.
    pub fn sc_all(&mut self) -> Result<Vec<SpacecraftCfg>, Error> {
        let identifiers = self.sc_list()?;
        identifiers
            .iter()
            .map(|identifier| self.sc_get(identifier))
            .collect()
    }

    pub fn leop_cfg(&mut self, identifier: &str) -> Result<LeopCfg, Error> {
        decode(self.rcall("leop.getCfg", vec![identifier.into()])?)
    }

    pub fn leop_set_cfg(&mut self, identifier: &str, cfg: &LeopCfg) -> Result<String, Error> {
        decode(self.rcall("leop.setCfg", vec![identifier.into(), serde_json::to_value(cfg)?])?)
    }

    pub fn leop_passes(&mut self, identifier: &str) -> Result<Vec<PassSlot>, Error> {
        decode(self.rcall("leop.getPasses", vec![identifier.into()])?)
    }

    /// Fetches the operational messages of a LEOP cluster reported after
    /// `since`.
    pub fn leop_messages(
        &mut self,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Message>, Error> {
        decode(self.rcall(
            "leop.getMessages",
            vec![identifier.into(), since.to_rfc3339().into()],
        )?)
    }

    pub fn leop_gs(&mut self, identifier: &str) -> Result<LeopGroundStations, Error> {
        decode(self.rcall("leop.gs.list", vec![identifier.into()])?)
    }

    pub fn leop_gs_add(&mut self, identifier: &str, gs_identifier: &str) -> Result<(), Error> {
        self.rcall(
            "leop.gs.add",
            vec![identifier.into(), vec![Value::from(gs_identifier)].into()],
        )?;
        Ok(())
    }

    pub fn leop_gs_remove(&mut self, identifier: &str, gs_identifier: &str) -> Result<(), Error> {
        self.rcall(
            "leop.gs.remove",
            vec![identifier.into(), vec![Value::from(gs_identifier)].into()],
        )?;
        Ok(())
    }
}
