//! Watchdog and inter-board link traits

/// Hardware watchdog
pub trait Watchdog {
    /// Reset the watchdog countdown
    ///
    /// Called first on every 10ms epoch.
    fn service(&mut self);
}

/// Outbound side of the inter-board link
pub trait CommsLink {
    /// Whether the link is compiled in
    const ENABLED: bool = true;

    /// Start sending the next outbound packet
    ///
    /// Fire-and-forget; called every 10ms epoch.
    fn start_send(&mut self);
}
