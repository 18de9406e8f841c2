// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use x11rb::connection::Connection;
use x11rb::protocol::randr::{self, ConnectionExt as _};

use crate::Error;

/// The RandR XID of an output, used for primary comparison.
pub type OutputHandle = u32;

/// Geometry of an active CRTC driving an output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One output as reported by the display server, before normalization.
#[derive(Clone, Debug)]
pub struct RawOutput {
    pub handle: OutputHandle,
    pub name: String,
    pub connected: bool,
    /// Present only when a CRTC is actively driving the output.
    pub geometry: Option<Geometry>,
}

/// Raw query results for one invocation.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub outputs: Vec<RawOutput>,
    /// The server's declared primary output, if it reported one.
    pub primary: Option<OutputHandle>,
}

/// Queries the X server once for every output and the declared primary.
///
/// # Errors
///
/// Returns error if the X server cannot be reached or a RandR request
/// fails. Both are fatal to the caller: without a snapshot there is
/// nothing to inspect or arrange.
pub fn query() -> Result<Snapshot, Error> {
    let (conn, screen_num) = x11rb::connect(None)?;
    let root = conn.setup().roots[screen_num].root;

    let resources = conn
        .randr_get_screen_resources_current(root)?
        .reply()
        .map_err(Error::Resources)?;

    // An absent or zero primary is not an error; discovery falls back to
    // the first head in sorted order.
    let primary = conn
        .randr_get_output_primary(root)
        .ok()
        .and_then(|cookie| cookie.reply().ok())
        .map(|reply| reply.output)
        .filter(|output| *output != 0);

    let mut outputs = Vec::with_capacity(resources.outputs.len());

    for &output in &resources.outputs {
        let info = conn
            .randr_get_output_info(output, resources.config_timestamp)?
            .reply()
            .map_err(|why| Error::OutputInfo(output, why))?;

        let name = String::from_utf8_lossy(&info.name).into_owned();
        let connected = info.connection == randr::Connection::CONNECTED;

        let geometry = if connected && info.crtc != 0 {
            let crtc = conn
                .randr_get_crtc_info(info.crtc, resources.config_timestamp)?
                .reply()
                .map_err(|why| Error::CrtcInfo(output, why))?;

            Some(Geometry {
                x: i32::from(crtc.x),
                y: i32::from(crtc.y),
                width: u32::from(crtc.width),
                height: u32::from(crtc.height),
            })
        } else {
            None
        };

        outputs.push(RawOutput {
            handle: output,
            name,
            connected,
            geometry,
        });
    }

    tracing::debug!(
        outputs = outputs.len(),
        primary = ?primary,
        "queried screen resources"
    );

    Ok(Snapshot { outputs, primary })
}
