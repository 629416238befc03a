//! Application state management for the partner program.
//!
//! `App` owns the registry for the whole session. Every handler runs one
//! user intent to completion: query the registry, mutate it, save it and
//! refresh the visible list of names.

use super::form::{FormKind, PartnerForm, TextInput};
use crate::domain::{DomainError, DomainResult, NotFound, Partner, Registry};
use crate::infrastructure::{PartnerRepository, PersistenceError};

/// Key reference shown in the help popup.
pub const HELP_TEXT: &str = r#"PARTNER PROGRAM HELP

=== LIST ===
↑↓ or j/k       Move the selection
Home/End, g/G   Jump to first/last partner
Enter           View details of the selected partner
Esc             Clear the selection

=== SEARCH ===
/ or s          Focus the search box
Enter           Search name, type, resources and contact
                (case-insensitive; an empty search shows everyone)
Esc             Leave the search box

=== ORDERING ===
1               Alphabetical
2               Reverse Alphabetical
3               Order Added
4               Reverse Order Added (reverses the stored order)

=== EDITING ===
a               Add a new partner
e               Edit the selected partner
d or Delete     Remove the selected partner (asks first)

In the add/edit form:
Tab or ↓        Next field
Shift+Tab or ↑  Previous field
Enter           Save (all four fields are required)
Esc             Cancel without changes

=== FILE ===
Every change is saved immediately to the partner file.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Exit the program"#;

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which popup,
/// if any, is drawn over the partner list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// List navigation, shortcuts available
    Normal,
    /// Typing into the search box
    Search,
    /// Add or edit form is open
    Form,
    /// Read-only details popup for one partner
    Details,
    /// Waiting for the user to confirm a removal
    ConfirmRemove,
    /// Blocking error message
    Alert,
    /// Help screen is displayed
    Help,
}

/// Which projection of the registry the list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Current registry order.
    OrderAdded,
    Alphabetical,
    ReverseAlphabetical,
    /// Partners matching the keyword, in registry order.
    SearchResults(String),
}

impl ListView {
    pub fn title(&self) -> String {
        match self {
            ListView::OrderAdded => "Order Added".to_string(),
            ListView::Alphabetical => "Alphabetical".to_string(),
            ListView::ReverseAlphabetical => "Reverse Alphabetical".to_string(),
            ListView::SearchResults(keyword) => format!("Search: {keyword}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Main application state: the registry plus everything the UI shows.
///
/// # Examples
///
/// ```
/// use partners::application::{App, AppMode};
/// use partners::domain::Registry;
/// use partners::infrastructure::PartnerRepository;
///
/// let app = App::new(Registry::new(), PartnerRepository::new("partners.csv"));
/// assert_eq!(app.mode, AppMode::Normal);
/// assert!(app.visible.is_empty());
/// assert_eq!(app.selected, None);
/// ```
#[derive(Debug)]
pub struct App {
    pub registry: Registry,
    pub repository: PartnerRepository,
    pub mode: AppMode,
    pub view: ListView,
    /// Partner names currently listed, in display order
    pub visible: Vec<String>,
    /// Index into `visible`
    pub selected: Option<usize>,
    pub search: TextInput,
    pub form: Option<PartnerForm>,
    pub details: Option<Partner>,
    pub pending_removal: Option<String>,
    pub alert: Option<Alert>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl App {
    pub fn new(registry: Registry, repository: PartnerRepository) -> Self {
        let mut app = Self {
            registry,
            repository,
            mode: AppMode::Normal,
            view: ListView::OrderAdded,
            visible: Vec::new(),
            selected: None,
            search: TextInput::default(),
            form: None,
            details: None,
            pending_removal: None,
            alert: None,
            status_message: None,
            help_scroll: 0,
        };
        app.set_view(ListView::OrderAdded);
        app
    }

    /// Builds the app from whatever the repository holds on disk.
    pub fn load(repository: PartnerRepository) -> Result<Self, PersistenceError> {
        let registry = repository.load()?;
        Ok(Self::new(registry, repository))
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.visible.get(i))
            .map(String::as_str)
    }

    // ---- list views ----

    /// Switches the list projection and selects the first entry.
    pub fn set_view(&mut self, view: ListView) {
        self.view = view;
        self.selected = Some(0);
        self.refresh();
    }

    /// Recomputes the visible names for the current view.
    ///
    /// Keeps the selected index where possible.
    pub fn refresh(&mut self) {
        let partners: Vec<&Partner> = match &self.view {
            ListView::OrderAdded => self.registry.iter().collect(),
            ListView::Alphabetical => self.registry.sorted_by_name(true),
            ListView::ReverseAlphabetical => self.registry.sorted_by_name(false),
            ListView::SearchResults(keyword) => self.registry.search(keyword),
        };
        self.visible = partners.into_iter().map(|p| p.name.clone()).collect();

        self.selected = match (self.selected, self.visible.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => None,
        };
    }

    pub fn show_alphabetical(&mut self) {
        self.status_message = None;
        self.set_view(ListView::Alphabetical);
    }

    pub fn show_reverse_alphabetical(&mut self) {
        self.status_message = None;
        self.set_view(ListView::ReverseAlphabetical);
    }

    pub fn show_order_added(&mut self) {
        self.status_message = None;
        self.set_view(ListView::OrderAdded);
    }

    /// Reverses the registry's own order, saves it and shows it.
    ///
    /// "Order Added" afterwards shows the reversed order as well.
    pub fn reverse_order_added(&mut self) {
        self.registry.reverse_order();
        self.status_message = None;
        self.set_view(ListView::OrderAdded);
        self.persist();
    }

    // ---- search ----

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.search.move_end();
        self.status_message = None;
    }

    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Filters the list by the search box contents.
    ///
    /// A blank keyword shows the full registry instead of searching.
    pub fn perform_search(&mut self) {
        self.mode = AppMode::Normal;
        let keyword = self.search.value().trim().to_string();

        if keyword.is_empty() {
            self.set_view(ListView::OrderAdded);
            self.status_message = Some(format!("Showing all {} partners", self.visible.len()));
            return;
        }

        self.set_view(ListView::SearchResults(keyword.clone()));
        let found = self.visible.len();
        tracing::debug!(%keyword, found, "search performed");
        self.status_message = Some(if found > 0 {
            format!(
                "Search completed: {} result{} found for '{}'",
                found,
                if found == 1 { "" } else { "s" },
                keyword
            )
        } else {
            format!("No results found for '{keyword}'")
        });
    }

    // ---- add / edit ----

    pub fn start_add(&mut self) {
        self.form = Some(PartnerForm::for_add());
        self.mode = AppMode::Form;
        self.status_message = None;
    }

    /// Opens the edit form pre-filled with the selected partner.
    pub fn start_edit(&mut self) {
        match self.selected_partner("edit") {
            Ok(partner) => {
                self.form = Some(PartnerForm::for_edit(partner));
                self.mode = AppMode::Form;
                self.status_message = None;
            }
            Err(e) => self.show_error(e),
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = AppMode::Normal;
    }

    /// Validates the open form and applies it to the registry.
    ///
    /// On a validation error the form stays open behind the alert so the
    /// input is not lost.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let partner = match form.validate() {
            Ok(partner) => partner,
            Err(e) => return self.show_error(e),
        };
        let kind = form.kind.clone();
        self.form = None;
        self.mode = AppMode::Normal;

        let name = partner.name.clone();
        let index = match kind {
            FormKind::Add => {
                self.registry.push(partner);
                tracing::info!(%name, "partner added");
                self.status_message = Some(format!("Partner {name} was added successfully."));
                self.registry.len() - 1
            }
            FormKind::Edit { original } => {
                let Some(index) = self.registry.position(&original) else {
                    return self.show_error(NotFound::Partner(original).into());
                };
                if let Some(slot) = self.registry.find_by_name_mut(&original) {
                    *slot = partner;
                }
                tracing::info!(%original, %name, "partner updated");
                self.status_message = Some(format!("Partner {name} was updated."));
                index
            }
        };

        self.set_view(ListView::OrderAdded);
        self.selected = Some(index);
        self.persist();
    }

    // ---- details ----

    pub fn view_selected(&mut self) {
        match self.selected_partner("view") {
            Ok(partner) => {
                self.details = Some(partner.clone());
                self.mode = AppMode::Details;
            }
            Err(e) => self.show_error(e),
        }
    }

    pub fn close_details(&mut self) {
        self.details = None;
        self.mode = AppMode::Normal;
    }

    // ---- remove ----

    /// Asks for confirmation before removing the selected partner.
    pub fn request_remove(&mut self) {
        match self.selected_partner("remove") {
            Ok(partner) => {
                self.pending_removal = Some(partner.name.clone());
                self.mode = AppMode::ConfirmRemove;
                self.status_message = None;
            }
            Err(e) => self.show_error(e),
        }
    }

    pub fn confirm_remove(&mut self) {
        self.mode = AppMode::Normal;
        let Some(name) = self.pending_removal.take() else {
            return;
        };

        if self.registry.remove(&name).is_none() {
            return self.show_error(NotFound::Partner(name).into());
        }
        tracing::info!(%name, "partner removed");
        self.status_message = Some(format!("Partner {name} was removed."));

        // Keep the cursor near where the removed entry was.
        self.view = ListView::OrderAdded;
        self.refresh();
        self.persist();
    }

    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
        self.mode = AppMode::Normal;
    }

    // ---- alerts ----

    pub fn show_error(&mut self, error: DomainError) {
        tracing::warn!(%error, "action rejected");
        self.alert = Some(Alert {
            title: error.title().to_string(),
            message: error.to_string(),
        });
        self.mode = AppMode::Alert;
    }

    /// Closes the alert, returning to an open form if there is one.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.mode = if self.form.is_some() {
            AppMode::Form
        } else {
            AppMode::Normal
        };
    }

    // ---- help ----

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Scrolls the help text down, stopping at its last line.
    pub fn scroll_help_down(&mut self, lines: usize) {
        let last = HELP_TEXT.lines().count().saturating_sub(1);
        self.help_scroll = (self.help_scroll + lines).min(last);
    }

    pub fn scroll_help_up(&mut self, lines: usize) {
        self.help_scroll = self.help_scroll.saturating_sub(lines);
    }

    // ---- selection ----

    pub fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.visible.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    pub fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(self.visible.len() - 1);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn selected_partner(&self, action: &'static str) -> DomainResult<&Partner> {
        let name = self
            .selected_name()
            .ok_or(NotFound::NoSelection(action))?;
        self.registry
            .find_by_name(name)
            .ok_or_else(|| NotFound::Partner(name.to_string()).into())
    }

    /// Saves the registry, turning a failure into an alert.
    fn persist(&mut self) {
        if let Err(e) = self.repository.save(&self.registry) {
            tracing::error!(error = %e, "failed to save partners");
            self.alert = Some(Alert {
                title: "Save Error".to_string(),
                message: e.to_string(),
            });
            self.mode = AppMode::Alert;
        }
    }
}
