//! Generic entity resolution.
//!
//! Turns a loosely-identified reference (owner id + human-typed name) into a
//! canonical stored entity. One implementation serves every owner-scoped
//! entity kind: it is parameterized over the narrow capability set in
//! [`NamedEntityOps`] rather than duplicated per kind.
//!
//! Resolution is an explicit two-outcome operation: callers learn whether
//! the entity was [`Resolved::Found`] or [`Resolved::Created`], so the
//! side-effecting branch is visible in logs and assertable in tests instead
//! of hiding inside a lookup.

use uuid::Uuid;

use crate::storage::{NamedEntityOps, StorageError};

/// Whether `resolve` may create a missing entity.
///
/// Policy is per context: the payment create path permits category creation
/// by default but requires accounts to pre-exist (configurable). Read paths
/// always require existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPolicy {
    /// Insert a new row when no `(owner, name)` match exists.
    CreateIfMissing,
    /// Reject unknown names; the caller turns this into a validation
    /// failure with correction options.
    RequireExisting,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    /// The reference matched an existing row; stored identity wins over
    /// anything else the candidate carried.
    Found(T),
    /// No match existed and the policy permitted insertion.
    Created(T),
}

impl<T> Resolved<T> {
    /// The resolved entity, either way.
    pub fn into_inner(self) -> T {
        match self {
            Resolved::Found(entity) | Resolved::Created(entity) => entity,
        }
    }

    /// True when this resolution inserted a new row.
    pub fn was_created(&self) -> bool {
        matches!(self, Resolved::Created(_))
    }
}

/// Why a resolution did not produce an entity.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The name matched no row and the policy forbade creation.
    #[error("name matched no existing entity")]
    UnknownName,

    /// The storage layer failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Resolve `(owner, name)` to a stored entity, inserting one if the policy
/// allows.
///
/// Idempotent: resolving the same pair twice yields the same entity id and
/// exactly one row. A lost duplicate-name race against a concurrent request
/// is not a failure: the insert reports a unique violation and the winning
/// row is read back.
pub async fn resolve<T, S>(
    ops: &mut S,
    owner_user_id: Uuid,
    name: &str,
    policy: CreationPolicy,
) -> Result<Resolved<T>, ResolveError>
where
    S: NamedEntityOps<T> + ?Sized,
    T: Send,
{
    if let Some(existing) = ops.find_by_owner_and_name(owner_user_id, name).await? {
        return Ok(Resolved::Found(existing));
    }

    match policy {
        CreationPolicy::RequireExisting => Err(ResolveError::UnknownName),
        CreationPolicy::CreateIfMissing => match ops.insert(owner_user_id, name).await {
            Ok(created) => Ok(Resolved::Created(created)),
            Err(StorageError::UniqueViolation(_)) => {
                // Lost the race; the row exists now.
                let existing = ops
                    .find_by_owner_and_name(owner_user_id, name)
                    .await?
                    .ok_or_else(|| {
                        StorageError::Backend(format!(
                            "row for \"{name}\" vanished after duplicate-name conflict"
                        ))
                    })?;
                Ok(Resolved::Found(existing))
            }
            Err(err) => Err(err.into()),
        },
    }
}
