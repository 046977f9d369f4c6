use std::cmp::Ordering;
use std::fmt;

use crate::internal::prelude::*;
use crate::model::id::{GuildId, RoleId};
use crate::model::Permissions;

/// Information about a role within a guild. A role represents a set of permissions, and can be
/// attached to one or multiple users. Roles are unique per guild and do not cross over to other
/// guilds in any way.
///
/// [Discord docs](https://discord.com/developers/docs/topics/permissions#role-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Role {
    /// The Id of the role. Can be used to calculate the role's creation date.
    pub id: RoleId,
    /// The Id of the Guild the Role is in.
    ///
    /// The gateway sends this next to the role rather than inside it; decoding the surrounding
    /// guild or role event fills it in.
    #[serde(default)]
    pub guild_id: GuildId,
    /// The name of the role.
    pub name: String,
    /// The colour of the role.
    #[serde(rename = "color", default)]
    pub colour: u32,
    /// Indicator of whether the role is pinned above lesser roles.
    ///
    /// In the client, this causes [`Member`]s in the role to be seen above those in roles with a
    /// lower [`Self::position`].
    ///
    /// [`Member`]: super::Member
    #[serde(default)]
    pub hoist: bool,
    /// Indicator of whether the role is managed by an integration service.
    #[serde(default)]
    pub managed: bool,
    /// Indicator of whether the role can be mentioned, similar to mentioning a specific member or
    /// `@everyone`.
    ///
    /// Only members of the role will be notified if a role is mentioned with this set to `true`.
    #[serde(default)]
    pub mentionable: bool,
    /// A set of permissions that the role has been assigned.
    ///
    /// See the [`permissions`] module for more information.
    ///
    /// [`permissions`]: crate::model::permissions
    #[serde(default)]
    pub permissions: Permissions,
    /// The role's position in the position list. Roles are considered higher in hierarchy if
    /// their position is higher.
    ///
    /// The `@everyone` role is usually either `-1` or `0`.
    #[serde(default)]
    pub position: i16,
}

impl Role {
    /// Checks whether the role has all of the given permissions.
    #[inline]
    #[must_use]
    pub fn has_permissions(&self, permissions: Permissions) -> bool {
        self.permissions.administrator() || self.permissions.contains(permissions)
    }

    /// Whether the role is the guild's `@everyone` role, which shares the guild's Id.
    #[must_use]
    pub fn is_everyone(&self) -> bool {
        self.id.get() == self.guild_id.get()
    }

    /// The mention string of the role, e.g. `<@&20>`.
    #[must_use]
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

impl fmt::Display for Role {
    /// Format a mention for the role, pinging its members.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mention())
    }
}

impl Eq for Role {}

impl Ord for Role {
    fn cmp(&self, other: &Role) -> Ordering {
        if self.position == other.position {
            self.id.cmp(&other.id)
        } else {
            self.position.cmp(&other.position)
        }
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Role) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn roles_order_by_position_then_id() {
        let low: Role = from_value(json!({"id": "30", "name": "low", "position": 1})).unwrap();
        let high: Role = from_value(json!({"id": "20", "name": "high", "position": 2})).unwrap();
        let tie: Role = from_value(json!({"id": "25", "name": "tie", "position": 1})).unwrap();

        assert!(high > low);
        assert!(tie < low);
    }

    #[test]
    fn administrator_has_everything() {
        let role: Role =
            from_value(json!({"id": "20", "name": "admin", "permissions": "8"})).unwrap();

        assert!(role.has_permissions(Permissions::BAN_MEMBERS | Permissions::MANAGE_ROLES));
        assert_eq!(role.guild_id, GuildId::default());
    }
}
