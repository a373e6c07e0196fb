use satnet_client::{Client, GroundStationCfg};

fn main() {
    let mut client = Client::new("http://localhost:8000/jrpc/").unwrap();

    let cfg = GroundStationCfg {
        identifier: "gs-vigo".to_string(),
        callsign: "EA1RCT".to_string(),
        elevation: 12.0,
        latlon: [42.17, -8.68],
    };

    let identifier = client.gs_add(&cfg).unwrap();
    println!("created ground station {}", identifier);

    for gs in client.gs_all().unwrap() {
        println!(
            "{:<12} {:<8} at {:.2} {:.2}, min elevation {}°",
            gs.identifier,
            gs.callsign,
            gs.lat(),
            gs.lng(),
            gs.elevation
        );
    }

    let mut updated = cfg;
    updated.callsign = "EA1RCT-2".to_string();
    client.gs_update("gs-vigo", &updated).unwrap();

    client.gs_delete("gs-vigo").unwrap();
}
