//! Member eligibility
//!
//! Pure functions deciding how a member takes part in collection. A member
//! is recorded when it is implicitly eligible through the access mode of its
//! owner or explicitly eligible through a structural marker. Ineligible
//! members still lead the walker to their value types.

use crate::key::KeyCategory;
use schema_weld::{AccessMode, MemberCategory, MemberKind, MemberNode};

/// What the walker does with one member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPlan {
    /// No key and no recursion
    Skip,
    /// An enumeration value: keyed under ENUMERATION, never recursed into
    EnumConstant,
    /// An ordinary member, recorded only when `eligible`
    Member {
        category: KeyCategory,
        eligible: bool,
    },
}

/// Whether the owner's access mode admits the member
pub fn is_implicitly_eligible(access: AccessMode, member: &MemberNode) -> bool {
    match access {
        AccessMode::AllFields => member.kind == MemberKind::Field && !member.is_static,
        AccessMode::AllProperties => member.kind == MemberKind::Accessor,
        AccessMode::PublicMembersOnly => member.visibility.is_public(),
        AccessMode::None => false,
    }
}

/// Whether a structural marker admits the member regardless of access mode
pub fn is_explicitly_eligible(member: &MemberNode) -> bool {
    member.has_structural_marker()
}

/// Decide how the walker handles a member
pub fn resolve_member(access: AccessMode, member: &MemberNode) -> MemberPlan {
    if member.is_enum_constant {
        return MemberPlan::EnumConstant;
    }
    if member.is_static {
        return MemberPlan::Skip;
    }
    let category = match member.effective_category() {
        MemberCategory::Transient => return MemberPlan::Skip,
        MemberCategory::Attribute => KeyCategory::Attribute,
        MemberCategory::Element => KeyCategory::Element,
    };
    MemberPlan::Member {
        category,
        eligible: is_implicitly_eligible(access, member) || is_explicitly_eligible(member),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_weld::TypeRef;

    fn field() -> MemberNode {
        MemberNode::field("value", TypeRef::string()).with_doc("about value")
    }

    #[test]
    fn test_public_members_only() {
        let private = field();
        assert!(!is_implicitly_eligible(AccessMode::PublicMembersOnly, &private));
        assert_eq!(
            resolve_member(AccessMode::PublicMembersOnly, &private),
            MemberPlan::Member {
                category: KeyCategory::Element,
                eligible: false
            }
        );

        let public = field().public();
        assert_eq!(
            resolve_member(AccessMode::PublicMembersOnly, &public),
            MemberPlan::Member {
                category: KeyCategory::Element,
                eligible: true
            }
        );
    }

    #[test]
    fn test_access_modes() {
        let accessor = MemberNode::accessor("getValue", TypeRef::string());
        assert!(is_implicitly_eligible(AccessMode::AllFields, &field()));
        assert!(!is_implicitly_eligible(AccessMode::AllFields, &accessor));
        assert!(is_implicitly_eligible(AccessMode::AllProperties, &accessor));
        assert!(!is_implicitly_eligible(AccessMode::AllProperties, &field()));
        assert!(!is_implicitly_eligible(AccessMode::None, &field().public()));
    }

    #[test]
    fn test_structural_markers() {
        assert!(is_explicitly_eligible(&field().attribute()));
        assert!(is_explicitly_eligible(&field().element()));
        assert!(is_explicitly_eligible(&field().named("other")));
        assert!(is_explicitly_eligible(&field().variant("integer", TypeRef::int())));
        assert!(!is_explicitly_eligible(&field()));

        assert_eq!(
            resolve_member(AccessMode::None, &field().attribute()),
            MemberPlan::Member {
                category: KeyCategory::Attribute,
                eligible: true
            }
        );
    }

    #[test]
    fn test_skipped_members() {
        assert_eq!(
            resolve_member(AccessMode::AllFields, &field().transient()),
            MemberPlan::Skip
        );
        assert_eq!(
            resolve_member(AccessMode::AllFields, &field().as_static().element()),
            MemberPlan::Skip
        );
        assert_eq!(
            resolve_member(AccessMode::None, &MemberNode::enum_constant("y")),
            MemberPlan::EnumConstant
        );
    }
}
