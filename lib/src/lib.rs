// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

pub mod config;
pub use config::Config;

pub mod head;
pub use head::{Head, HeadCollection};

pub mod layout;
pub use layout::{Arrangement, Directive, Placement};

pub mod randr;
pub use randr::{Geometry, OutputHandle, RawOutput, Snapshot};

pub mod xrandr;

use x11rb::protocol::randr::Output;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not connect to X server")]
    Connect(#[from] x11rb::errors::ConnectError),
    #[error("X connection error")]
    Connection(#[from] x11rb::errors::ConnectionError),
    #[error("could not get screen resources")]
    Resources(#[source] x11rb::errors::ReplyError),
    #[error("could not get output info for output {0}")]
    OutputInfo(Output, #[source] x11rb::errors::ReplyError),
    #[error("could not get crtc info for output {0}")]
    CrtcInfo(Output, #[source] x11rb::errors::ReplyError),
    #[error("could not exec `{}`", xrandr::PROGRAM)]
    Spawn(#[source] std::io::Error),
}
