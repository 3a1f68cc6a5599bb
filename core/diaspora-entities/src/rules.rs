use crate::kind::EntityKind;
use crate::validation::{Rule, RuleSet};

const AUTHOR: &[Rule] = &[Rule::DiasporaId];
const GUID: &[Rule] = &[Rule::Guid];
const PRESENT: &[Rule] = &[Rule::NotEmpty];
const TEXT: &[Rule] = &[Rule::Length { min: 0, max: 65535 }];
const NAME: &[Rule] = &[Rule::Length { min: 0, max: 32 }];
const DIMENSION: &[Rule] = &[Rule::NonNegative];
const SUMMARY: &[Rule] = &[Rule::NotEmpty, Rule::Length { min: 1, max: 255 }];
const COMMENT_TEXT: &[Rule] = &[Rule::NotEmpty, Rule::Length { min: 1, max: 65535 }];

impl EntityKind {
    /// Semantic rules for this kind.
    #[must_use]
    pub fn rules(self) -> &'static RuleSet {
        match self {
            Self::TestEntity => &TEST_ENTITY,
            Self::TestDefaultEntity => &TEST_DEFAULT_ENTITY,
            Self::TestNestedEntity => &TEST_NESTED_ENTITY,
            Self::Location => &LOCATION,
            Self::Event => &EVENT,
            Self::Profile => &PROFILE,
            Self::Person => &PERSON,
            Self::Photo => &PHOTO,
            Self::StatusMessage => &STATUS_MESSAGE,
            Self::Comment => &COMMENT,
            Self::Like => &LIKE,
            Self::Reshare => &RESHARE,
        }
    }
}

static TEST_ENTITY: RuleSet = RuleSet {
    kind: EntityKind::TestEntity,
    rules: &[],
};

static TEST_DEFAULT_ENTITY: RuleSet = RuleSet {
    kind: EntityKind::TestDefaultEntity,
    rules: &[],
};

static TEST_NESTED_ENTITY: RuleSet = RuleSet {
    kind: EntityKind::TestNestedEntity,
    rules: &[],
};

static LOCATION: RuleSet = RuleSet {
    kind: EntityKind::Location,
    rules: &[("lat", PRESENT), ("lng", PRESENT)],
};

static EVENT: RuleSet = RuleSet {
    kind: EntityKind::Event,
    rules: &[
        ("author", AUTHOR),
        ("guid", GUID),
        ("summary", SUMMARY),
        ("description", TEXT),
    ],
};

static PROFILE: RuleSet = RuleSet {
    kind: EntityKind::Profile,
    rules: &[
        ("author", AUTHOR),
        ("first_name", NAME),
        ("last_name", NAME),
        ("tag_string", TEXT),
    ],
};

static PERSON: RuleSet = RuleSet {
    kind: EntityKind::Person,
    rules: &[
        ("guid", GUID),
        ("author", AUTHOR),
        ("url", PRESENT),
        ("exported_key", PRESENT),
    ],
};

static PHOTO: RuleSet = RuleSet {
    kind: EntityKind::Photo,
    rules: &[
        ("author", AUTHOR),
        ("guid", GUID),
        ("status_message_guid", GUID),
        ("remote_photo_path", PRESENT),
        ("remote_photo_name", PRESENT),
        ("height", DIMENSION),
        ("width", DIMENSION),
    ],
};

static STATUS_MESSAGE: RuleSet = RuleSet {
    kind: EntityKind::StatusMessage,
    rules: &[("author", AUTHOR), ("guid", GUID), ("text", TEXT)],
};

static COMMENT: RuleSet = RuleSet {
    kind: EntityKind::Comment,
    rules: &[
        ("author", AUTHOR),
        ("guid", GUID),
        ("parent_guid", GUID),
        ("text", COMMENT_TEXT),
    ],
};

static LIKE: RuleSet = RuleSet {
    kind: EntityKind::Like,
    rules: &[
        ("author", AUTHOR),
        ("guid", GUID),
        ("parent_guid", GUID),
        ("parent_type", PRESENT),
    ],
};

// Rules attach by property name, so the root author and the resharer share
// the same checks.
static RESHARE: RuleSet = RuleSet {
    kind: EntityKind::Reshare,
    rules: &[
        ("root_author", AUTHOR),
        ("root_guid", GUID),
        ("author", AUTHOR),
        ("guid", GUID),
    ],
};
