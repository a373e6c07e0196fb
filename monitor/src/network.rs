//! Worker thread talking to the SATNet server.
//!
//! The UI never blocks on the network; it queues a [`Command`] and gets the
//! answer back as a [`Data`] event on the main channel. Remote errors are
//! logged, transport failures additionally flag the lost connection.

use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, SendError, Sender};
use log::{trace, warn};
use satnet_client::{
    Client, Error, GroundStationCfg, GroundTrackPoint, LeopGroundStations, Message, PassSlot,
    SpacecraftCfg,
};
use std::thread;

use crate::event::Event;
use crate::settings::Settings;

pub enum Data {
    GroundStations(Vec<GroundStationCfg>),
    Spacecraft(Vec<SpacecraftCfg>),
    Passes(Vec<PassSlot>),
    Messages(Vec<Message>),
    GroundTrack(String, Vec<GroundTrackPoint>),
    LeopGroundStations(LeopGroundStations),
}

pub enum Command {
    SyncGroundStations,
    SyncSpacecraft,
    SyncPasses(Vec<String>),
    SyncMessages(DateTime<Utc>),
    SyncLeop,
    GetGroundTrack(String),
    LeopAssign(String),
    LeopRelease(String),
    DeleteGroundStation(String),
}

pub struct Connection {
    command_tx: Sender<Command>,
}

impl Connection {
    pub fn new(settings: &Settings, data_tx: Sender<Event>) -> Self {
        // the command queue must never hold up the UI thread, only the
        // worker blocks when responses back up on the main channel
        let (command_tx, command_rx) = unbounded();

        let endpoint = settings.api_endpoint.clone();
        let credentials = settings.credentials();
        let leop = settings.leop.clone();

        thread::spawn(move || run_worker(endpoint, credentials, leop, command_rx, data_tx));

        Self { command_tx }
    }

    pub fn send(&self, command: Command) -> Result<(), SendError<Command>> {
        self.command_tx.send(command)
    }
}

fn run_worker(
    endpoint: String,
    credentials: Option<(String, String)>,
    leop: Option<String>,
    command_rx: Receiver<Command>,
    data_tx: Sender<Event>,
) {
    let client = match credentials {
        Some((username, password)) => Client::with_credentials(&endpoint, &username, &password),
        None => Client::new(&endpoint),
    };

    let mut client = match client {
        Ok(client) => client,
        Err(err) => {
            warn!("could not set up client for {}: {}", endpoint, err);
            let _ = data_tx.send(Event::NoServerConnection);
            return;
        }
    };

    while let Ok(command) = command_rx.recv() {
        match execute(&mut client, leop.as_deref(), command, &data_tx) {
            Ok(()) => {}
            Err(Error::Transport(err)) => {
                warn!("no connection to {}: {}", endpoint, err);
                if data_tx.send(Event::NoServerConnection).is_err() {
                    break;
                }
            }
            Err(err) => warn!("remote call failed: {}", err),
        }
    }

    warn!("command channel closed");
}

fn execute(
    client: &mut Client,
    leop: Option<&str>,
    command: Command,
    data_tx: &Sender<Event>,
) -> Result<(), Error> {
    match command {
        Command::SyncGroundStations => {
            trace!("gs.list");
            let stations = client.gs_all()?;
            let _ = data_tx.send(Event::CommandResponse(Data::GroundStations(stations)));
        }
        Command::SyncSpacecraft => {
            trace!("sc.list");
            let spacecraft = client.sc_all()?;
            let _ = data_tx.send(Event::CommandResponse(Data::Spacecraft(spacecraft)));
        }
        Command::SyncPasses(sc_identifiers) => {
            let slots = match leop {
                Some(leop) => {
                    trace!("leop.getPasses({})", leop);
                    client.leop_passes(leop)?
                }
                None => {
                    let mut slots = vec![];
                    for identifier in &sc_identifiers {
                        trace!("sc.getPasses({})", identifier);
                        slots.extend(client.sc_passes(identifier)?);
                    }
                    slots
                }
            };
            let _ = data_tx.send(Event::CommandResponse(Data::Passes(slots)));
        }
        Command::SyncMessages(since) => {
            if let Some(leop) = leop {
                trace!("leop.getMessages({}, {})", leop, since);
                let messages = client.leop_messages(leop, since)?;
                let _ = data_tx.send(Event::CommandResponse(Data::Messages(messages)));
            }
        }
        Command::SyncLeop => {
            if let Some(leop) = leop {
                trace!("leop.gs.list({})", leop);
                let assignment = client.leop_gs(leop)?;
                let _ = data_tx.send(Event::CommandResponse(Data::LeopGroundStations(assignment)));
            }
        }
        Command::GetGroundTrack(identifier) => {
            trace!("sc.getGroundtrack({})", identifier);
            let track = client.sc_ground_track(&identifier)?;
            let _ = data_tx.send(Event::CommandResponse(Data::GroundTrack(identifier, track)));
        }
        Command::LeopAssign(gs_identifier) => {
            if let Some(leop) = leop {
                client.leop_gs_add(leop, &gs_identifier)?;
                let assignment = client.leop_gs(leop)?;
                let _ = data_tx.send(Event::CommandResponse(Data::LeopGroundStations(assignment)));
            }
        }
        Command::LeopRelease(gs_identifier) => {
            if let Some(leop) = leop {
                client.leop_gs_remove(leop, &gs_identifier)?;
                let assignment = client.leop_gs(leop)?;
                let _ = data_tx.send(Event::CommandResponse(Data::LeopGroundStations(assignment)));
            }
        }
        Command::DeleteGroundStation(identifier) => {
            client.gs_delete(&identifier)?;
            let stations = client.gs_all()?;
            let _ = data_tx.send(Event::CommandResponse(Data::GroundStations(stations)));
        }
    }

    Ok(())
}
