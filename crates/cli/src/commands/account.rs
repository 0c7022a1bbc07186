//! Local account commands.

use std::io::Write;

use boxpaper_storefront::services::IdentityStore;

use super::CommandError;

/// Print the local account.
///
/// # Errors
///
/// Returns `CommandError::NoAccount` if none exists.
pub fn show(identity: &IdentityStore, out: &mut impl Write) -> Result<(), CommandError> {
    let user = identity.current_user().ok_or(CommandError::NoAccount)?;
    writeln!(out, "Name:    {}", user.name)?;
    writeln!(out, "Email:   {}", user.email)?;
    writeln!(out, "ID:      {}", user.id)?;
    writeln!(out, "Created: {}", user.created_at.format("%Y-%m-%d %H:%M"))?;
    Ok(())
}

/// Remove the local account. Succeeds when there is none.
///
/// # Errors
///
/// Returns an error if the record cannot be deleted.
pub fn logout(identity: &IdentityStore, out: &mut impl Write) -> Result<(), CommandError> {
    identity.logout()?;
    writeln!(out, "Signed out")?;
    Ok(())
}
