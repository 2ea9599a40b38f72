#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User checked or unchecked a single site.
    SiteToggled { site: String, checked: bool },
    /// User toggled the "all sites" checkbox.
    AllSitesToggled(bool),
    /// User picked an operation (or cleared the radio group).
    OperationSelected(Option<String>),
    VerboseToggled(bool),
    DryRunToggled(bool),
    /// User asked to run the selected operation on the selected sites.
    PerformOpsClicked,
    /// Engine finished one site request, successfully or not.
    SiteOpSettled {
        batch_id: crate::BatchId,
        site: String,
        outcome: SiteOpOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOpOutcome {
    /// The endpoint answered with a `msgs` list (possibly empty).
    Messages(Vec<String>),
    /// The request never produced a usable payload.
    Failed { reason: String },
}
