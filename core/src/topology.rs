use pnet::datalink;

use lanward_common::models::NetworkInfo;
use lanward_common::network::interface;
use lanward_common::ports::TopologyReader;

/// Reads the primary LAN interface from the OS interface list.
pub struct SystemTopology;

impl TopologyReader for SystemTopology {
    fn read(&self) -> anyhow::Result<Option<NetworkInfo>> {
        let interfaces = datalink::interfaces();
        Ok(interface::select_primary(interfaces).and_then(|intf| interface::network_info(&intf)))
    }
}
