// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permissions and the permission check.

use super::claims::DecodedClaims;
use super::error::AuthError;

/// Permissions guarding the drinks API.
///
/// ## Grants
///
/// - `get:drinks-detail` - Read recipes in full
/// - `post:drinks` - Add drinks to the menu
/// - `patch:drinks` - Edit existing drinks
/// - `delete:drinks` - Remove drinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GetDrinksDetail,
    PostDrinks,
    PatchDrinks,
    DeleteDrinks,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::GetDrinksDetail,
        Permission::PostDrinks,
        Permission::PatchDrinks,
        Permission::DeleteDrinks,
    ];

    /// Permission string as it appears in the token's `permissions` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetDrinksDetail => "get:drinks-detail",
            Permission::PostDrinks => "post:drinks",
            Permission::PatchDrinks => "patch:drinks",
            Permission::DeleteDrinks => "delete:drinks",
        }
    }

    /// Parse a permission string (exact match).
    pub fn parse(s: &str) -> Option<Permission> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confirm `required` is listed in the claims' `permissions` array.
pub fn check_permissions(required: &str, claims: &DecodedClaims) -> Result<(), AuthError> {
    let granted = claims.permissions().ok_or(AuthError::MissingPermissions)?;

    if !granted.contains(&required) {
        return Err(AuthError::PermissionDenied(required.to_string()));
    }

    Ok(())
}
