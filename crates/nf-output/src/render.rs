//! Network → XML bytes.
//!
//! Layout:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <!DOCTYPE network SYSTEM "http://www.matsim.org/files/dtd/network_v2.dtd">
//! <network>
//!   <nodes>
//!     <node id=".." x=".." y=".."/>
//!   </nodes>
//!   <links>
//!     <link id=".." from=".." to=".." length="%.3f" freespeed="%.3f"
//!           capacity="%.1f" permlanes=".." modes=".."/>
//!   </links>
//! </network>
//! ```
//!
//! Node coordinates use the shortest representation that round-trips
//! (`1000000.0`, `953901.1650000001`).  Attribute values are escaped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use nf_network::{Network, NetworkLink, NetworkNode};

use crate::OutputResult;

/// Content of the `<!DOCTYPE ...>` declaration.
pub const NETWORK_DOCTYPE: &str =
    r#"network SYSTEM "http://www.matsim.org/files/dtd/network_v2.dtd""#;

const INDENT: usize = 2;

/// Serialize `network` to a complete XML document ending at `</network>`.
pub fn render_network(network: &Network) -> OutputResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(NETWORK_DOCTYPE)))?;
    writer.write_event(Event::Start(BytesStart::new("network")))?;

    writer.write_event(Event::Start(BytesStart::new("nodes")))?;
    for node in network.nodes() {
        writer.write_event(Event::Empty(node_element(node)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("nodes")))?;

    writer.write_event(Event::Start(BytesStart::new("links")))?;
    for link in network.links() {
        writer.write_event(Event::Empty(link_element(link)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("links")))?;

    writer.write_event(Event::End(BytesEnd::new("network")))?;

    Ok(writer.into_inner())
}

fn node_element(node: &NetworkNode) -> BytesStart<'_> {
    let x = format!("{:?}", node.coord.x);
    let y = format!("{:?}", node.coord.y);
    BytesStart::new("node").with_attributes([
        ("id", node.id.as_str()),
        ("x", x.as_str()),
        ("y", y.as_str()),
    ])
}

fn link_element(link: &NetworkLink) -> BytesStart<'_> {
    let length = format!("{:.3}", link.length_m);
    let freespeed = format!("{:.3}", link.freespeed_mps);
    let capacity = format!("{:.1}", link.capacity);
    let permlanes = link.permlanes.to_string();
    BytesStart::new("link").with_attributes([
        ("id", link.id.as_str()),
        ("from", link.from.as_str()),
        ("to", link.to.as_str()),
        ("length", length.as_str()),
        ("freespeed", freespeed.as_str()),
        ("capacity", capacity.as_str()),
        ("permlanes", permlanes.as_str()),
        ("modes", link.mode.as_str()),
    ])
}
