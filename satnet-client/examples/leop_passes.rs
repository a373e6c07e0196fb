use chrono::{Duration, Utc};
use satnet_client::Client;

fn main() {
    let mut client =
        Client::with_credentials("http://localhost:8000/jrpc/", "operator", "secret").unwrap();

    let leop = "leop-demo";

    let assignment = client.leop_gs(leop).unwrap();
    println!("available: {:?}", assignment.available);
    println!("in use:    {:?}", assignment.in_use);

    for slot in client.leop_passes(leop).unwrap() {
        println!(
            "#{} {} / {} from {} to {}",
            slot.identifier, slot.gs_identifier, slot.sc_identifier, slot.slot_start, slot.slot_end
        );
    }

    let since = Utc::now() - Duration::hours(6);
    for message in client.leop_messages(leop, since).unwrap() {
        println!(
            "[{}] {}: {}",
            message.timestamp, message.gs_identifier, message.message
        );
    }
}
