//! Interactive directory menu.
//!
//! One long-lived pool for the whole session, explicitly passed to every
//! action. Store failures are reported as marked ✗ lines and the loop
//! carries on; only a dead connection at startup or a closed stdin ends
//! the process.

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};

use phonedir_core::{
    connect_pool, ensure_schema, import_csv, render_csv, Contact, ContactStore, DbConfig,
    NewContact, StoreError,
};

const MENU: &str = "\
 MAIN MENU:
 1. Add New Contact
 2. Search Contacts
 3. View All Contacts
 4. Update Contact
 5. Delete Contact
 6. Export to CSV
 7. Import from CSV
 8. Exit";

const DEFAULT_EXPORT_FILE: &str = "contacts_export.csv";

pub async fn run() -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = connect_pool(&config)
        .await
        .context("Please ensure PostgreSQL is running and the connection details are correct")?;
    ensure_schema(&pool).await?;

    println!();
    println!("========================================");
    println!("     TELEPHONE DIRECTORY");
    println!("========================================");

    loop {
        println!("\n{MENU}");
        let choice = prompt("\nEnter your choice (1-8): ")?;
        let store = ContactStore::new(&pool);

        match choice.as_str() {
            "1" => add_contact(&store).await?,
            "2" => search_contacts(&store).await?,
            "3" => view_all_contacts(&store).await?,
            "4" => update_contact(&store).await?,
            "5" => delete_contact(&store).await?,
            "6" => export_to_csv(&store).await?,
            "7" => import_from_csv(&store).await?,
            "8" => break,
            _ => println!("✗ Invalid choice. Please enter a number between 1-8."),
        }
    }

    pool.close().await;
    println!("\nGoodbye!");
    Ok(())
}

async fn add_contact(store: &ContactStore<'_>) -> Result<()> {
    section("ADD NEW CONTACT");
    let name = prompt("Name: ")?;
    let phone = prompt("Phone: ")?;
    let address = prompt("Address (optional): ")?;

    if name.is_empty() || phone.is_empty() {
        println!("✗ Name and phone are required!");
        return Ok(());
    }

    let draft = NewContact::new(name.as_str(), phone.as_str(), address.as_str());
    match store.add(&draft).await {
        Ok(_) => println!("✓ Contact '{name}' added successfully!"),
        Err(StoreError::DuplicatePhone { phone }) => {
            println!("✗ Phone number '{phone}' already exists!");
        }
        Err(err) => println!("✗ Error adding contact: {err}"),
    }
    Ok(())
}

async fn search_contacts(store: &ContactStore<'_>) -> Result<()> {
    section("SEARCH CONTACTS");
    let term = prompt("Search (name, phone, or address): ")?;
    if term.is_empty() {
        println!("✗ Please enter a search term.");
        return Ok(());
    }

    match store.search(&term).await {
        Ok(contacts) => {
            display_contacts(&contacts);
            println!("\nFound {} contact(s).", contacts.len());
        }
        Err(err) => println!("✗ Error searching contacts: {err}"),
    }
    Ok(())
}

async fn view_all_contacts(store: &ContactStore<'_>) -> Result<()> {
    section("ALL CONTACTS");
    match store.list_all().await {
        Ok(contacts) => {
            display_contacts(&contacts);
            println!("\nTotal: {} contact(s)", contacts.len());
        }
        Err(err) => println!("✗ Error fetching contacts: {err}"),
    }
    Ok(())
}

async fn update_contact(store: &ContactStore<'_>) -> Result<()> {
    section("UPDATE CONTACT");
    let Some(id) = prompt_id("Contact ID to update: ")? else {
        return Ok(());
    };
    let name = prompt("New name: ")?;
    let phone = prompt("New phone: ")?;
    let address = prompt("New address (optional): ")?;

    if name.is_empty() || phone.is_empty() {
        println!("✗ Name and phone are required!");
        return Ok(());
    }

    let draft = NewContact::new(name.as_str(), phone.as_str(), address.as_str());
    match store.update(id, &draft).await {
        Ok(()) => println!("✓ Contact ID {id} updated successfully!"),
        Err(StoreError::NotFound { .. }) => println!("✗ Contact ID {id} not found!"),
        Err(err) => println!("✗ Error updating contact: {err}"),
    }
    Ok(())
}

async fn delete_contact(store: &ContactStore<'_>) -> Result<()> {
    section("DELETE CONTACT");
    let Some(id) = prompt_id("Contact ID to delete: ")? else {
        return Ok(());
    };

    let confirm = prompt(&format!("Delete contact ID {id}? (y/N): "))?;
    if !confirm.eq_ignore_ascii_case("y") {
        println!("Deletion cancelled.");
        return Ok(());
    }

    match store.delete(id).await {
        Ok(()) => println!("✓ Contact ID {id} deleted successfully!"),
        Err(StoreError::NotFound { .. }) => println!("✗ Contact ID {id} not found!"),
        Err(err) => println!("✗ Error deleting contact: {err}"),
    }
    Ok(())
}

async fn export_to_csv(store: &ContactStore<'_>) -> Result<()> {
    section("EXPORT TO CSV");
    let mut filename = prompt(&format!("Filename (default: {DEFAULT_EXPORT_FILE}): "))?;
    if filename.is_empty() {
        filename = DEFAULT_EXPORT_FILE.to_string();
    }

    let contacts = match store.list_all().await {
        Ok(contacts) => contacts,
        Err(err) => {
            println!("✗ Error exporting contacts: {err}");
            return Ok(());
        }
    };
    if contacts.is_empty() {
        println!("✗ No contacts to export!");
        return Ok(());
    }

    let written = render_csv(&contacts)
        .map_err(anyhow::Error::from)
        .and_then(|bytes| std::fs::write(&filename, bytes).map_err(Into::into));
    match written {
        Ok(()) => println!("✓ Exported {} contacts to '{}'", contacts.len(), filename),
        Err(err) => println!("✗ Error exporting contacts: {err}"),
    }
    Ok(())
}

async fn import_from_csv(store: &ContactStore<'_>) -> Result<()> {
    section("IMPORT FROM CSV");
    let filename = prompt("CSV file to import: ")?;
    if filename.is_empty() {
        println!("✗ Please enter a filename.");
        return Ok(());
    }

    let file = match File::open(&filename) {
        Ok(file) => file,
        Err(_) => {
            println!("✗ File '{filename}' not found!");
            return Ok(());
        }
    };

    match import_csv(store, BufReader::new(file)).await {
        Ok(report) => {
            println!("✓ Imported {} contacts", report.imported);
            if report.skipped > 0 {
                println!("✗ Skipped {} contacts (duplicates or errors)", report.skipped);
            }
        }
        Err(err) => println!("✗ Error importing contacts: {err}"),
    }
    Ok(())
}

fn display_contacts(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("No contacts found.");
        return;
    }

    let rule = "=".repeat(80);
    println!("\n{rule}");
    println!("{:<4} {:<25} {:<15} {:<35}", "ID", "Name", "Phone", "Address");
    println!("{rule}");
    for contact in contacts {
        println!(
            "{:<4} {:<25} {:<15} {:<35}",
            contact.id,
            contact.name,
            contact.phone,
            display_address(&contact.address)
        );
    }
    println!("{rule}");
}

/// Keep the table narrow: long addresses are cut at 32 chars.
fn display_address(address: &str) -> String {
    if address.is_empty() {
        "(No address)".to_string()
    } else if address.chars().count() > 32 {
        let head: String = address.chars().take(29).collect();
        format!("{head}...")
    } else {
        address.to_string()
    }
}

fn section(title: &str) {
    let rule = "-".repeat(40);
    println!("\n{rule}\n{title}\n{rule}");
}

/// Prompt for an id, reporting a parse failure as invalid input.
fn prompt_id(label: &str) -> Result<Option<i64>> {
    let raw = prompt(label)?;
    match raw.parse::<i64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("✗ Please enter a valid ID number.");
            Ok(None)
        }
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        // EOF: treat a closed stdin as the end of the session.
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}
