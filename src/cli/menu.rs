//! Interactive numbered menu
//!
//! Reads choices and field values line by line, mutates one in-memory store,
//! and saves after every change. End of input saves and quits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use console::style;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::commands::{load_store, position_of};
use crate::cli::output::contact_row;
use crate::core::{Contact, ContactPatch, ContactStore, SortDirection, SortKey};
use crate::error::{ContactsError, Result};
use crate::storage::json;

const RECENT_LOG_LINES: usize = 10;

pub fn run_interactive(ctx: &AppContext) -> Result<()> {
    let (store, _) = load_store(ctx)?;
    let stdin = io::stdin();
    Menu::new(ctx, store, stdin.lock(), io::stdout()).run()
}

pub struct Menu<'a, R, W> {
    ctx: &'a AppContext,
    store: ContactStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub const fn new(ctx: &'a AppContext, store: ContactStore, input: R, output: W) -> Self {
        Self {
            ctx,
            store,
            input,
            output,
        }
    }

    pub const fn store(&self) -> &ContactStore {
        &self.store
    }

    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Loop until the user quits or input ends. Errors from a single action
    /// are printed and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line("Choice: ")? else {
                writeln!(self.output)?;
                return self.save_and_quit();
            };

            let outcome = match choice.as_str() {
                "1" => self.add(),
                "2" => self.delete(),
                "3" => self.list(),
                "4" => self.search(),
                "5" => self.edit(),
                "6" => self.find(),
                "7" => self.sort(),
                "8" => self.export(),
                "9" => self.import(),
                "10" => self.recent_log(),
                "0" => return self.save_and_quit(),
                other => Err(ContactsError::InvalidSelection(format!(
                    "unknown choice {other:?}"
                ))),
            };

            if let Err(err) = outcome {
                debug!(target: "menu", error = %err, "menu action failed");
                writeln!(self.output, "{} {err}", style("error:").red())?;
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", style("Contacts").bold())?;
        for line in [
            "1. Add a contact",
            "2. Delete a contact",
            "3. List contacts",
            "4. Search by last name",
            "5. Edit a contact",
            "6. Find by id",
            "7. Sort contacts",
            "8. Export to JSON",
            "9. Import from JSON",
            "10. Show recent activity",
            "0. Save and quit",
        ] {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let last_name = self.ask("Last name: ")?;
        let first_name = self.ask("First name: ")?;
        let email = self.ask("Email: ")?;
        let phone = self.ask("Phone: ")?;

        if self
            .store
            .exists_duplicate(&last_name, &first_name, &email)
        {
            self.ctx.log.warning(
                "duplicate contact detected",
                Some(&format!("{last_name} {first_name} <{email}>")),
            );
            writeln!(
                self.output,
                "{} a contact with these names and email already exists",
                style("warning:").yellow()
            )?;
            if !self.confirm("Add anyway? (y/N) ")? {
                writeln!(self.output, "Not added.")?;
                return Ok(());
            }
        }

        let contact = self
            .store
            .add(Contact::new(last_name, first_name, email, phone))
            .clone();
        self.save()?;
        self.ctx.log.contact_action("added", &contact);
        writeln!(self.output, "{} Added {contact}", style("✓").green())?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No contacts to delete.")?;
            return Ok(());
        }
        self.list()?;
        let index = self.ask_index("Number of the contact to delete: ")?;
        let Some(contact) = self.store.get(index) else {
            return Err(self.out_of_range(index));
        };
        let question = format!(
            "Really delete {} {}? (y/N) ",
            contact.last_name, contact.first_name
        );
        if !self.confirm(&question)? {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(());
        }

        let removed = self.store.remove_at(index)?;
        self.save()?;
        self.ctx.log.contact_action("deleted", &removed);
        writeln!(self.output, "{} Deleted {removed}", style("✓").green())?;
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        writeln!(self.output, "{}", style("Contacts").bold())?;
        writeln!(self.output, "--------")?;
        for (i, contact) in self.store.iter().enumerate() {
            writeln!(self.output, "{}", contact_row(i + 1, contact))?;
        }
        writeln!(self.output, "Total: {}", self.store.len())?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let name = self.ask("Last name to search for: ")?;
        match self.store.find_by_name(&name) {
            Some(contact) => {
                let row = contact_row(position_of(&self.store, contact), contact);
                writeln!(self.output, "{row}")?;
            }
            None => writeln!(self.output, "No contact with last name {name}.")?,
        }
        self.ctx.log.info("search", Some(&name));
        Ok(())
    }

    fn find(&mut self) -> Result<()> {
        let id = self.ask("Id or id prefix (8+ characters): ")?;
        match self.store.find_by_id(&id) {
            Some(contact) => {
                let row = contact_row(position_of(&self.store, contact), contact);
                writeln!(self.output, "{row}")?;
                writeln!(self.output, "Id: {}", contact.id)?;
            }
            None => writeln!(self.output, "No contact with id {id}.")?,
        }
        Ok(())
    }

    fn edit(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No contacts to edit.")?;
            return Ok(());
        }
        self.list()?;
        let index = self.ask_index("Number of the contact to edit: ")?;
        let Some(current) = self.store.get(index).cloned() else {
            return Err(self.out_of_range(index));
        };

        writeln!(self.output, "Press Enter to keep the current value.")?;
        let patch = ContactPatch {
            last_name: self.ask_change("Last name", &current.last_name)?,
            first_name: self.ask_change("First name", &current.first_name)?,
            email: self.ask_change("Email", &current.email)?,
            phone: self.ask_change("Phone", &current.phone)?,
        };
        if patch.is_empty() {
            writeln!(self.output, "Nothing changed.")?;
            return Ok(());
        }

        let updated = self.store.edit(index, &patch)?.clone();
        self.save()?;
        self.ctx.log.contact_action("edited", &updated);
        writeln!(self.output, "{} Updated {updated}", style("✓").green())?;
        Ok(())
    }

    fn sort(&mut self) -> Result<()> {
        let key = match self.ask("Sort by (1) last name or (2) first name: ")?.as_str() {
            "" | "1" => SortKey::LastName,
            "2" => SortKey::FirstName,
            other => {
                return Err(ContactsError::InvalidSelection(format!(
                    "unknown sort field {other:?}"
                )));
            }
        };
        let direction = if self.confirm("Descending? (y/N) ")? {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        self.store.sort(key, direction);
        self.save()?;
        self.ctx
            .log
            .info("contacts sorted", Some(&format!("{key:?} {direction:?}")));
        self.list()
    }

    fn export(&mut self) -> Result<()> {
        let path = PathBuf::from(self.ask("Export file: ")?);
        if let Err(err) = json::export_to(&self.store, &path) {
            self.ctx.log.failure("export", &err);
            return Err(err);
        }
        self.ctx.log.success(
            "contacts exported",
            Some(&format!("{} -> {}", self.store.len(), path.display())),
        );
        writeln!(
            self.output,
            "{} Exported {} contacts to {}",
            style("✓").green(),
            self.store.len(),
            path.display()
        )?;
        Ok(())
    }

    fn import(&mut self) -> Result<()> {
        let path = PathBuf::from(self.ask("Import file: ")?);
        let imported = match json::import_from(&path) {
            Ok(imported) => imported,
            Err(err) => {
                self.ctx.log.failure("import", &err);
                return Err(err);
            }
        };
        let read = imported.len();
        let added = if self.confirm("Replace current contacts? (y/N) ")? {
            self.store = imported;
            read
        } else {
            self.store.merge(imported)
        };
        self.save()?;
        self.ctx.log.success(
            "contacts imported",
            Some(&format!("{added} of {read} from {}", path.display())),
        );
        writeln!(
            self.output,
            "{} Imported {added} of {read} contacts",
            style("✓").green()
        )?;
        Ok(())
    }

    fn recent_log(&mut self) -> Result<()> {
        let lines = self.ctx.log.recent(RECENT_LOG_LINES)?;
        if lines.is_empty() {
            writeln!(self.output, "Activity log is empty.")?;
        }
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.ctx.save(&self.store)
    }

    fn save_and_quit(&mut self) -> Result<()> {
        self.save()?;
        writeln!(
            self.output,
            "{} Saved {} contacts.",
            style("✓").green(),
            self.store.len()
        )?;
        Ok(())
    }

    /// One trimmed line, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?
            .ok_or_else(|| ContactsError::InvalidSelection("input ended".to_string()))
    }

    fn ask_index(&mut self, prompt: &str) -> Result<usize> {
        let raw = self.ask(prompt)?;
        raw.parse::<usize>()
            .map_err(|_| ContactsError::InvalidSelection(format!("{raw:?} is not a number")))
    }

    /// `None` when the answer is blank, which keeps the current value.
    fn ask_change(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        let answer = self.ask(&format!("{label} [{current}]: "))?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Yes is `y`, `yes`, `o`, or `oui`; anything else, including end of
    /// input, is no.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.read_line(prompt)?.unwrap_or_default().to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes" | "o" | "oui"))
    }

    fn out_of_range(&self, index: usize) -> ContactsError {
        ContactsError::InvalidSelection(format!(
            "contact number {index} is out of range (1-{})",
            self.store.len()
        ))
    }
}
