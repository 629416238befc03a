//! In-memory partner registry.
//!
//! The registry is an ordered list of partners. Its native order is the
//! order records were added in, which only [`Registry::reverse_order`]
//! changes. Queries return borrowed views and never reorder the registry.
//! Persisting changes is the caller's job.

use super::models::Partner;

/// Ordered collection of partner records.
///
/// # Examples
///
/// ```
/// use partners::domain::Registry;
///
/// let mut registry = Registry::new();
/// registry.add("Acme Foodbank", "Nonprofit", "Food,Shelter", "555-0100");
///
/// let hits = registry.search("food");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Acme Foodbank");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    partners: Vec<Partner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// All partners in current registry order.
    pub fn partners(&self) -> &[Partner] {
        &self.partners
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Partner> {
        self.partners.iter()
    }

    /// Appends a new partner and returns it.
    ///
    /// Content is not validated here; callers check for empty fields first.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        partner_type: impl Into<String>,
        resources: impl Into<String>,
        contact: impl Into<String>,
    ) -> &Partner {
        self.push(Partner::new(name, partner_type, resources, contact))
    }

    /// Appends an already-built partner and returns it.
    pub fn push(&mut self, partner: Partner) -> &Partner {
        tracing::debug!(name = %partner.name, "partner appended to registry");
        self.partners.push(partner);
        &self.partners[self.partners.len() - 1]
    }

    /// Case-insensitive substring search over every field of every partner.
    ///
    /// Results keep registry order. An empty keyword matches everything;
    /// the shell skips the call in that case and shows the full registry.
    pub fn search(&self, keyword: &str) -> Vec<&Partner> {
        let needle = keyword.to_lowercase();
        self.partners
            .iter()
            .filter(|partner| partner.matches_lowercase(&needle))
            .collect()
    }

    /// Returns a stably sorted view by name without touching registry order.
    ///
    /// Ordering is the plain `str` ordering, so it is case-sensitive.
    /// Partners sharing a name keep their registry order in both directions.
    pub fn sorted_by_name(&self, ascending: bool) -> Vec<&Partner> {
        let mut view: Vec<&Partner> = self.partners.iter().collect();
        if ascending {
            view.sort_by(|a, b| a.name.cmp(&b.name));
        } else {
            view.sort_by(|a, b| b.name.cmp(&a.name));
        }
        view
    }

    /// Reverses the registry's own order in place.
    pub fn reverse_order(&mut self) {
        self.partners.reverse();
    }

    /// Removes the first partner whose name is exactly `name`.
    ///
    /// Returns `None` and leaves the registry untouched if no partner has
    /// that name.
    pub fn remove(&mut self, name: &str) -> Option<Partner> {
        let index = self.position(name)?;
        Some(self.partners.remove(index))
    }

    /// First partner whose name is exactly `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&Partner> {
        self.partners.iter().find(|partner| partner.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Partner> {
        self.partners.iter_mut().find(|partner| partner.name == name)
    }

    /// Index of the first partner named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.partners.iter().position(|partner| partner.name == name)
    }
}

impl FromIterator<Partner> for Registry {
    fn from_iter<I: IntoIterator<Item = Partner>>(iter: I) -> Self {
        Self {
            partners: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Partner;
    type IntoIter = std::slice::Iter<'a, Partner>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
