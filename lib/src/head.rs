// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::cmp::Ordering;

use crate::config::Config;
use crate::randr::{OutputHandle, Snapshot};

/// One enabled output with active CRTC geometry. Immutable once discovered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Head {
    pub handle: OutputHandle,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The normalized snapshot of every output known to the display server,
/// partitioned into enabled heads, connected-but-disabled outputs, and
/// disconnected outputs.
///
/// Heads are kept sorted ascending by (x, y), giving a left-to-right,
/// top-to-bottom reading order. The sort is a heuristic for typical grid
/// arrangements; overlapping or irregular layouts keep whatever order the
/// comparator yields.
#[derive(Clone, Debug, Default)]
pub struct HeadCollection {
    heads: Vec<Head>,
    primary: Option<usize>,
    disabled: Vec<String>,
    disconnected: Vec<String>,
}

impl HeadCollection {
    /// Normalizes raw query results into the partitioned, sorted model.
    ///
    /// Disconnected outputs and connected outputs without an active CRTC
    /// never become heads. The declared primary is honored when it names
    /// an enabled head; otherwise the first head in sorted order is
    /// primary, and an empty head list has no primary at all.
    #[must_use]
    pub fn discover(snapshot: Snapshot) -> Self {
        let mut heads = Vec::with_capacity(snapshot.outputs.len());
        let mut disabled = Vec::new();
        let mut disconnected = Vec::new();

        for output in snapshot.outputs {
            if !output.connected {
                disconnected.push(output.name);
                continue;
            }

            let Some(geometry) = output.geometry else {
                disabled.push(output.name);
                continue;
            };

            heads.push(Head {
                handle: output.handle,
                name: output.name,
                x: geometry.x,
                y: geometry.y,
                width: geometry.width,
                height: geometry.height,
            });
        }

        heads.sort_by(|a, b| match a.x.cmp(&b.x) {
            Ordering::Equal => a.y.cmp(&b.y),
            ordering => ordering,
        });

        let primary = snapshot
            .primary
            .and_then(|declared| heads.iter().position(|head| head.handle == declared))
            .or(if heads.is_empty() { None } else { Some(0) });

        Self {
            heads,
            primary,
            disabled,
            disconnected,
        }
    }

    /// Enabled heads in sorted order.
    #[must_use]
    pub fn heads(&self) -> &[Head] {
        &self.heads
    }

    /// Connected outputs without an active CRTC.
    #[must_use]
    pub fn disabled(&self) -> &[String] {
        &self.disabled
    }

    /// Outputs with nothing plugged in.
    #[must_use]
    pub fn disconnected(&self) -> &[String] {
        &self.disconnected
    }

    /// The primary head, absent only when no head is enabled.
    #[must_use]
    pub fn primary(&self) -> Option<&Head> {
        self.primary.map(|index| &self.heads[index])
    }

    #[must_use]
    pub fn is_primary(&self, head: &Head) -> bool {
        self.primary()
            .is_some_and(|primary| primary.handle == head.handle)
    }

    /// Every output name in the snapshot, enabled first, then disabled,
    /// then disconnected.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.heads
            .iter()
            .map(|head| head.name.as_str())
            .chain(self.disabled.iter().map(String::as_str))
            .chain(self.disconnected.iter().map(String::as_str))
    }

    /// Finds an enabled head by raw name or alias. The literal name
    /// `primary` matches the primary head.
    #[must_use]
    pub fn find_enabled(&self, config: &Config, name: &str) -> Option<&Head> {
        if name == "primary" {
            return self.primary();
        }

        self.heads
            .iter()
            .find(|head| head.name == name || config.alias_of(&head.name) == name)
    }

    /// Finds a connected-but-disabled output by raw name or alias.
    #[must_use]
    pub fn find_disabled(&self, config: &Config, name: &str) -> Option<&str> {
        find_name(&self.disabled, config, name)
    }

    /// Finds a disconnected output by raw name or alias.
    #[must_use]
    pub fn find_disconnected(&self, config: &Config, name: &str) -> Option<&str> {
        find_name(&self.disconnected, config, name)
    }

    /// Resolves a name to the raw name of a connected output, enabled or
    /// disabled. Disconnected outputs are excluded: enabling one is not a
    /// legal operation.
    #[must_use]
    pub fn resolve_connected(&self, config: &Config, name: &str) -> Option<&str> {
        if let Some(head) = self.find_enabled(config, name) {
            return Some(&head.name);
        }

        self.find_disabled(config, name)
    }
}

fn find_name<'a>(outputs: &'a [String], config: &Config, name: &str) -> Option<&'a str> {
    outputs
        .iter()
        .find(|output| *output == name || config.alias_of(output) == name)
        .map(String::as_str)
}
