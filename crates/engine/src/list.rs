use provadmin_types::ProviderRecord;

/// Read-only cache of the provider collection plus search and selection.
///
/// The selection is kept as an id and resolved against the cache on every
/// read, so a record that disappears after a reload is deselected.
#[derive(Debug, Default)]
pub struct ProviderList {
    records: Vec<ProviderRecord>,
    selected_id: Option<String>,
    search: String,
    generation: u64,
    loading: bool,
}

impl ProviderList {
    pub fn records(&self) -> &[ProviderRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new fetch and returns its generation.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Replaces the cache wholesale and drops a selection that no longer resolves.
    pub fn replace(&mut self, records: Vec<ProviderRecord>) {
        self.records = records;
        self.loading = false;
        if self.selected().is_none() {
            self.selected_id = None;
        }
    }

    /// A failed fetch leaves the cache untouched.
    pub fn fail_load(&mut self) {
        self.loading = false;
    }

    pub fn find(&self, id: &str) -> Option<&ProviderRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Records matching the current search term, in cache order.
    pub fn visible(&self) -> Vec<&ProviderRecord> {
        self.search_results(&self.search)
    }

    /// Pure projection of the cache; never triggers a fetch.
    pub fn search_results(&self, term: &str) -> Vec<&ProviderRecord> {
        self.records.iter().filter(|record| record.matches_search(term)).collect()
    }

    /// Selects a cached record. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if self.find(id).is_some() {
            self.selected_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|record| record.id.as_str())
    }

    pub fn selected(&self) -> Option<&ProviderRecord> {
        self.selected_id.as_deref().and_then(|id| self.find(id))
    }

    /// Index of the selection within [`ProviderList::visible`].
    pub fn selected_visible_index(&self) -> Option<usize> {
        let id = self.selected_id()?;
        self.visible().iter().position(|record| record.id == id)
    }

    /// Moves the selection within the visible rows, clamping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let visible = self.visible();
        if visible.is_empty() {
            return;
        }
        let next = match self.selected_visible_index() {
            Some(index) => index.saturating_add_signed(delta).min(visible.len() - 1),
            None if delta < 0 => visible.len() - 1,
            None => 0,
        };
        let id = visible[next].id.clone();
        self.selected_id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, email: &str, cnpj: Option<&str>) -> ProviderRecord {
        let mut record = ProviderRecord::new(id, name);
        record.email = email.into();
        record.cnpj = cnpj.map(str::to_string);
        record
    }

    fn sample() -> ProviderList {
        let mut list = ProviderList::default();
        list.replace(vec![
            record("1", "Alpha", "ops@alpha.net", Some("11.111.111/0001-11")),
            record("2", "Beta", "noc@beta.com", None),
            record("3", "Gamma Fibra", "contato@ALPHAPARTNER.com", Some("22.222.222/0001-22")),
        ]);
        list
    }

    fn ids(records: Vec<&ProviderRecord>) -> Vec<&str> {
        records.into_iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn search_matches_name_and_email_case_insensitively() {
        let list = sample();
        assert_eq!(ids(list.search_results("alp")), vec!["1", "3"]);
        assert_eq!(ids(list.search_results("BETA")), vec!["2"]);
        assert_eq!(ids(list.search_results("")).len(), 3);
    }

    #[test]
    fn cnpj_matches_as_exact_substring() {
        let list = sample();
        assert_eq!(ids(list.search_results("222.222")), vec!["3"]);
        assert!(list.search_results("zzz").is_empty());
    }

    #[test]
    fn two_record_search_example() {
        let mut list = ProviderList::default();
        list.replace(vec![ProviderRecord::new("1", "Alpha"), ProviderRecord::new("2", "Beta")]);
        assert_eq!(ids(list.search_results("alp")), vec!["1"]);
    }

    #[test]
    fn selection_is_resolved_after_reload() {
        let mut list = sample();
        assert!(list.select("2"));
        assert_eq!(list.selected().map(|record| record.name.as_str()), Some("Beta"));

        let mut renamed = record("2", "Beta Telecom", "noc@beta.com", None);
        renamed.city = "Natal".into();
        list.replace(vec![record("1", "Alpha", "", None), renamed]);
        assert_eq!(list.selected().map(|record| record.name.as_str()), Some("Beta Telecom"));

        list.replace(vec![record("1", "Alpha", "", None)]);
        assert!(list.selected().is_none());
        assert!(list.selected_id().is_none());
    }

    #[test]
    fn unknown_ids_are_not_selected() {
        let mut list = sample();
        assert!(!list.select("42"));
        assert!(list.selected().is_none());
    }

    #[test]
    fn selection_moves_within_visible_rows() {
        let mut list = sample();
        list.set_search("a");
        list.move_selection(1);
        assert_eq!(list.selected_id(), Some("1"));
        list.move_selection(5);
        assert_eq!(list.selected_id(), Some("3"));
        list.move_selection(-1);
        assert_eq!(list.selected_id(), Some("2"));
        list.move_selection(-10);
        assert_eq!(list.selected_id(), Some("1"));
    }

    #[test]
    fn generations_advance_per_load() {
        let mut list = ProviderList::default();
        let first = list.begin_load();
        let second = list.begin_load();
        assert!(list.is_loading());
        assert!(!list.is_current(first));
        assert!(list.is_current(second));
        list.fail_load();
        assert!(!list.is_loading());
    }
}
