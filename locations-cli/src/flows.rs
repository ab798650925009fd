//! Interactive location flows.
//!
//! Each flow is a short prompt sequence. A resolver failure the user can act
//! on is printed and ends only that flow; anything else is returned.

use anyhow::Result;
use locations_core::{
    ChosenLocation, ConfigStore, LocationRepository, LocationResolver, ResolvedLocation,
    is_valid_location, resolver::CURRENT_LOCATION,
};

use crate::console::Console;

const MENU: &[&str] = &[
    "Search location",
    "View locations",
    "Add location",
    "Save current location",
    "Delete location",
    "Quit",
];

pub struct LocationCli<'a, S, C> {
    repo: &'a LocationRepository<S>,
    resolver: &'a LocationResolver,
    console: &'a mut C,
}

impl<'a, S: ConfigStore, C: Console> LocationCli<'a, S, C> {
    pub fn new(
        repo: &'a LocationRepository<S>,
        resolver: &'a LocationResolver,
        console: &'a mut C,
    ) -> Self {
        Self { repo, resolver, console }
    }

    /// Menu loop over every flow until the user quits.
    pub async fn manage(&mut self) -> Result<()> {
        loop {
            match self.console.select("Manage locations:", MENU)? {
                0 => self.search_location(None).await?,
                1 => self.view_locations()?,
                2 => self.add_location()?,
                3 => self.save_current_location().await?,
                4 => self.delete_location()?,
                _ => return Ok(()),
            }
        }
    }

    /// List locations numbered from 1 and return the one picked.
    ///
    /// Returns `None` when there is nothing to choose from.
    pub fn choose_location(
        &mut self,
        task: &str,
        include_sensitive: bool,
    ) -> Result<Option<ChosenLocation>> {
        let locations = self.repo.load(include_sensitive)?;
        if locations.is_empty() {
            self.console.print("No locations found. Please add one first.");
            return Ok(None);
        }

        self.console.print(&format!("\nChoose a location {task}:"));
        for (index, name) in locations.keys().enumerate() {
            self.console.print(&format!("{}. {}", index + 1, title_case(name)));
        }

        let index = self.console.get_index(locations.len())?;
        Ok(locations
            .iter()
            .nth(index)
            .map(|(name, coordinate)| ChosenLocation::from_entry(name, coordinate)))
    }

    /// Pick a location and print it as `name: lat, lon`.
    pub fn print_chosen_location(&mut self, include_sensitive: bool) -> Result<()> {
        if let Some(chosen) = self.choose_location("", include_sensitive)? {
            self.console.print(&format!("{}: {}, {}", chosen.name, chosen.lat, chosen.lon));
        }
        Ok(())
    }

    /// Search by address and optionally save the result.
    pub async fn search_location(&mut self, query: Option<String>) -> Result<()> {
        let query = match query {
            Some(query) => query,
            None => self.console.text("Enter location to search:")?,
        };

        let Some(found) = self.resolve_or_report(&query).await? else {
            return Ok(());
        };

        self.console.print(&format!("Address found: {}", found.display_name));
        if self.console.confirm("Save this location?")? {
            let name = self.console.text("Enter a name for this location:")?;
            let name = match name.trim() {
                "" => found.display_name.clone(),
                trimmed => trimmed.to_string(),
            };
            self.repo.save(&name, &found.coordinate().to_string())?;
            self.console.print(&format!("Location '{name}' saved successfully."));
        }

        Ok(())
    }

    /// Print saved (non-sensitive) locations.
    pub fn view_locations(&mut self) -> Result<()> {
        let locations = self.repo.load(false)?;
        if locations.is_empty() {
            self.console.print("No locations found. Please add one first.");
            return Ok(());
        }

        self.console.print("\nYour Locations:\n");
        for (name, coordinate) in &locations {
            let entry = ChosenLocation::from_entry(name, coordinate);
            self.console.print(&format!(
                "{}:\n    latitude: {}\n    longitude: {}",
                title_case(name),
                entry.lat,
                entry.lon
            ));
        }

        Ok(())
    }

    /// Add a location from a typed name and coordinate.
    pub fn add_location(&mut self) -> Result<()> {
        let (name, coordinate) = loop {
            let name = self.console.text("Enter location name:")?;
            self.console
                .print("Enter comma separated coordinates Lat/Long (Deg), e.g., 1.599, 12.6168");
            let coordinate = self.console.text(">")?;

            if !name.trim().is_empty()
                && is_valid_location(&coordinate)
                && self.console.confirm("Done?")?
            {
                break (name.trim().to_string(), coordinate.trim().to_string());
            }
        };

        if self.console.confirm(&format!("Save this location?\n {name}: {coordinate}"))? {
            self.repo.save(&name, &coordinate)?;
            self.console.print(&format!("New location {name} saved successfully."));
        }

        Ok(())
    }

    /// Resolve the current location from the IP address and optionally save it.
    pub async fn save_current_location(&mut self) -> Result<()> {
        let Some(current) = self.resolve_or_report(CURRENT_LOCATION).await? else {
            return Ok(());
        };

        self.console.print(&format!(
            "Current location: {}:\n\tlatitude: {}, longitude: {}",
            current.display_name, current.lat, current.lon
        ));

        let mut name = current.display_name.clone();
        if self.console.confirm("Do you want to rename location address?")? {
            let renamed = self.console.text("Enter new name for this location:")?;
            if !renamed.trim().is_empty() {
                name = renamed.trim().to_string();
            }
        }
        if self.console.confirm("Save this location?")? {
            self.repo.save(&name, &current.coordinate().to_string())?;
            self.console.print("Current location saved successfully.");
        }

        Ok(())
    }

    /// Delete a saved location. Sensitive locations are not offered.
    pub fn delete_location(&mut self) -> Result<()> {
        let Some(chosen) = self.choose_location("to delete", false)? else {
            return Ok(());
        };

        if self
            .console
            .confirm(&format!("Are you sure you want to delete '{}'?", chosen.name))?
        {
            self.repo.delete(&chosen.name)?;
            self.console.print(&format!("\n'{}' deleted successfully.", chosen.name));
        }

        Ok(())
    }

    async fn resolve_or_report(&mut self, query: &str) -> Result<Option<ResolvedLocation>> {
        match self.resolver.resolve(query).await {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_recoverable() => {
                self.console.print(&format!("Error: {e}"));
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Capitalise the first letter of every word: `new york` → `New York`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
