//! Mirror walkthrough example
//!
//! Run with: cargo run --example mirror_watch
//!
//! Drives a manager with a small scripted in-memory transport: a server
//! enumerates a device, a node and a metadata store, updates the node, flips
//! a default-sink property, then withdraws the node. The example prints every
//! broadcast event and a final statistics snapshot.
//!
//! In a real deployment the `Connection` implementation wraps the socket to
//! the media server and forwards its notifications into the channel; the
//! mirror side of the code looks exactly like this.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use mirror_rs::{
    Connection, ConnectionError, ConnectionEvent, GlobalInfo, Info, Manager, ManagerEvents,
    NodeInfo, NodeState, PropertyChange, ProxyHandle, RegistryHandle, CORE_ID,
};

/// Transport stub: sync requests hand out increasing sequence numbers,
/// binds always succeed.
struct ScriptedConnection {
    seq: Arc<AtomicU32>,
}

struct ScriptedRegistry;

struct ScriptedProxy {
    id: u32,
}

impl Connection for ScriptedConnection {
    fn request_sync(&mut self) -> u32 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn get_registry(&mut self, _version: u32) -> Result<Box<dyn RegistryHandle>, ConnectionError> {
        Ok(Box::new(ScriptedRegistry))
    }
}

impl RegistryHandle for ScriptedRegistry {
    fn bind(
        &mut self,
        id: u32,
        type_tag: &str,
        version: u32,
        _flags: u32,
    ) -> Result<Box<dyn ProxyHandle>, ConnectionError> {
        tracing::debug!(id, type_tag, version, "transport: proxy bound");
        Ok(Box::new(ScriptedProxy { id }))
    }

    fn destroy(&mut self) {
        tracing::debug!("transport: registry released");
    }
}

impl ProxyHandle for ScriptedProxy {
    fn destroy(&mut self) {
        tracing::debug!(id = self.id, "transport: proxy destroy requested");
    }
}

fn global(id: u32, type_tag: &str, props: &[(&str, &str)]) -> ConnectionEvent {
    ConnectionEvent::Global(GlobalInfo {
        id,
        permissions: 7,
        type_tag: type_tag.into(),
        version: 3,
        properties: props
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mirror_rs=debug".parse()?)
                .add_directive("mirror_watch=debug".parse()?),
        )
        .init();

    let seq = Arc::new(AtomicU32::new(0));
    let mut manager = Manager::new(ScriptedConnection {
        seq: Arc::clone(&seq),
    })?;

    manager.subscribe(ManagerEvents {
        sync: Some(Box::new(|| println!("== mirror consistent =="))),
        added: Some(Box::new(|o| {
            println!(
                "added   id={} kind={} props={:?}",
                o.id,
                o.kind(),
                o.properties
            )
        })),
        updated: Some(Box::new(|o| {
            println!("updated id={} info={:?}", o.id, o.info)
        })),
        removed: Some(Box::new(|o| println!("removed id={}", o.id))),
        metadata: Some(Box::new(|c: &PropertyChange| {
            println!(
                "meta    subject={} {}=({}) {}",
                c.subject, c.key, c.value_type, c.value
            )
        })),
    });

    // The "server": enumerate, settle, update, withdraw.
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(global(3, "Device", &[("device.name", "usb_headset")]))?;
    tx.send(global(
        5,
        "Node",
        &[("node.name", "usb_headset.playback")],
    ))?;
    tx.send(global(7, "Metadata", &[]))?;
    // Completion for the last sync request in the batch above.
    tx.send(ConnectionEvent::Done {
        id: CORE_ID,
        seq: seq.load(Ordering::Relaxed) + 3,
    })?;
    tx.send(ConnectionEvent::Info {
        id: 5,
        info: Info::Node(NodeInfo {
            state: NodeState::Running,
            max_input_ports: 2,
            n_input_ports: 2,
            ..NodeInfo::default()
        }),
    })?;
    tx.send(ConnectionEvent::Property {
        id: 7,
        change: PropertyChange {
            subject: 5,
            key: "default.audio.sink".into(),
            value_type: "s".into(),
            value: "usb_headset.playback".into(),
        },
    })?;
    tx.send(ConnectionEvent::GlobalRemove { id: 5 })?;
    drop(tx);

    manager.run(rx).await;

    println!();
    println!("device present: {}", manager.find(3).is_some());
    println!("node present:   {}", manager.find(5).is_some());
    println!("stats: {:?}", manager.stats());

    manager.destroy();
    Ok(())
}
