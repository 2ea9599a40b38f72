/// Immutable snapshot of the form, taken at the moment of dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub operation: Option<String>,
    pub sites: Vec<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

/// One pending `/site-op` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOpRequest {
    pub site: String,
    pub op: String,
    pub verbose: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("You didn't select an operation")]
    NoOperation,
    #[error("You didn't select any sites")]
    NoSites,
}

impl Selection {
    /// Validates the selection and expands it into one request per site, in
    /// selection order. A missing operation is reported before missing sites.
    pub fn plan(&self) -> Result<Vec<SiteOpRequest>, SelectionError> {
        let op = match self.operation.as_deref() {
            Some(op) if !op.is_empty() => op,
            _ => return Err(SelectionError::NoOperation),
        };
        if self.sites.is_empty() {
            return Err(SelectionError::NoSites);
        }

        Ok(self
            .sites
            .iter()
            .map(|site| SiteOpRequest {
                site: site.clone(),
                op: op.to_string(),
                verbose: self.verbose,
                dry_run: self.dry_run,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_operation_name_counts_as_unselected() {
        let selection = Selection {
            operation: Some(String::new()),
            sites: vec!["lnba".to_string()],
            ..Selection::default()
        };
        assert_eq!(selection.plan(), Err(SelectionError::NoOperation));
    }

    #[test]
    fn missing_operation_wins_over_missing_sites() {
        assert_eq!(
            Selection::default().plan(),
            Err(SelectionError::NoOperation)
        );
    }

    #[test]
    fn plan_keeps_selection_order_and_flags() {
        let selection = Selection {
            operation: Some("remote_backup".to_string()),
            sites: vec!["unrba".to_string(), "gattishouse".to_string()],
            verbose: true,
            dry_run: false,
        };
        let requests = selection.plan().unwrap();
        let sites: Vec<_> = requests.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(sites, vec!["unrba", "gattishouse"]);
        assert!(requests
            .iter()
            .all(|r| r.op == "remote_backup" && r.verbose && !r.dry_run));
    }
}
