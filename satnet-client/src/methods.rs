//! Short service names and the remote procedures they stand for.
//!
//! Callers address the server through two-level names like `gs.list` or
//! `leop.getPasses`; the full dotted method paths of the remote interface
//! stay in one table here.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::Error;

lazy_static! {
    static ref SERVICES: HashMap<&'static str, &'static str> = {
        let mut table = HashMap::new();

        table.insert("gs.list", "configuration.gs.list");
        table.insert("gs.add", "configuration.gs.create");
        table.insert("gs.get", "configuration.gs.getCfg");
        table.insert("gs.update", "configuration.gs.setCfg");
        table.insert("gs.delete", "configuration.gs.delete");
        table.insert("gs.getPasses", "simulation.groundstation.getPasses");

        table.insert("sc.list", "configuration.sc.list");
        table.insert("sc.add", "configuration.sc.create");
        table.insert("sc.get", "configuration.sc.getCfg");
        table.insert("sc.update", "configuration.sc.setCfg");
        table.insert("sc.delete", "configuration.sc.delete");
        table.insert("sc.getPasses", "simulation.spacecraft.getPasses");
        table.insert("sc.getGroundtrack", "simulation.spacecraft.getGroundtrack");

        table.insert("leop.getCfg", "leop.getConfiguration");
        table.insert("leop.setCfg", "leop.setConfiguration");
        table.insert("leop.getPasses", "leop.getPasses");
        table.insert("leop.getMessages", "leop.getMessages");
        table.insert("leop.gs.list", "leop.gs.list");
        table.insert("leop.gs.add", "leop.gs.add");
        table.insert("leop.gs.remove", "leop.gs.remove");

        table
    };
}

/// Resolves a short service name to its remote method path. Unknown names
/// are rejected here, synchronously, so a typo never turns into a request.
pub fn resolve(service: &str) -> Result<&'static str, Error> {
    SERVICES
        .get(service)
        .copied()
        .ok_or_else(|| Error::ServiceNotFound(service.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_services_resolve() {
        assert_eq!(resolve("gs.list").unwrap(), "configuration.gs.list");
        assert_eq!(resolve("gs.update").unwrap(), "configuration.gs.setCfg");
        assert_eq!(
            resolve("sc.getGroundtrack").unwrap(),
            "simulation.spacecraft.getGroundtrack"
        );
        assert_eq!(resolve("leop.getCfg").unwrap(), "leop.getConfiguration");
    }

    #[test]
    fn unknown_service_is_rejected() {
        match resolve("gs.reboot") {
            Err(Error::ServiceNotFound(name)) => assert_eq!(name, "gs.reboot"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn rejection_names_the_service() {
        let err = resolve("nope").unwrap_err();
        assert_eq!(err.to_string(), "service not found, id = <nope>");
    }

    #[test]
    fn table_covers_the_published_interface() {
        let services = [
            "gs.list",
            "gs.get",
            "gs.add",
            "gs.update",
            "gs.delete",
            "gs.getPasses",
            "sc.list",
            "sc.get",
            "sc.add",
            "sc.update",
            "sc.delete",
            "sc.getPasses",
            "sc.getGroundtrack",
            "leop.getCfg",
            "leop.setCfg",
            "leop.getPasses",
            "leop.getMessages",
            "leop.gs.list",
            "leop.gs.add",
            "leop.gs.remove",
        ];

        for service in services {
            assert!(resolve(service).is_ok(), "missing service {}", service);
        }

        assert_eq!(SERVICES.len(), services.len());
    }
}
