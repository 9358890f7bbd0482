//! Ledger records
//!
//! Every record is a flat JSON document stored under a globally unique key
//! and tagged with an `objectType` discriminator for query scoping. Field
//! names match the documents already on the ledger (`violationID`,
//! `driverID`, ...), so they are renamed explicitly rather than through
//! `rename_all`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::role::Role;

/// Status assigned to every freshly submitted appeal
pub const APPEAL_STATUS_PENDING: &str = "Pending";

/// Document discriminator stored in the `objectType` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Violation,
    Appeal,
    User,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Violation => "violation",
            ObjectType::Appeal => "appeal",
            ObjectType::User => "user",
        }
    }
}

/// A record type that can be stored as a ledger document
pub trait Document: Serialize + DeserializeOwned {
    /// Discriminator written into every document of this type
    const OBJECT_TYPE: ObjectType;

    /// Key the document is stored under
    fn record_id(&self) -> &str;
}

/// Read only the `objectType` of a stored document.
///
/// Returns `Ok(None)` for documents written without a discriminator.
pub fn peek_object_type(bytes: &[u8]) -> Result<Option<String>, serde_json::Error> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(rename = "objectType", default)]
        object_type: Option<String>,
    }

    let envelope: Envelope = serde_json::from_slice(bytes)?;
    Ok(envelope.object_type)
}

/// Caller-supplied fields of a new violation
///
/// `adminID` is deliberately absent: it is captured from the caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationDraft {
    pub violation_id: String,
    pub driver_id: String,
    pub violation_type: String,
    pub location: String,
    pub penalty_amount: i64,
    pub timestamp: String,
    pub license_plate_number: String,
    pub image: String,
    pub remark: String,
    pub payment_status: bool,
    pub violation_status: bool,
}

/// Traffic violation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "violationID")]
    pub violation_id: String,

    #[serde(rename = "violationType")]
    pub violation_type: String,

    pub location: String,

    #[serde(rename = "penaltyAmount")]
    pub penalty_amount: i64,

    pub timestamp: String,

    #[serde(rename = "licensePlateNumber")]
    pub license_plate_number: String,

    /// Image reference (URL or encoded blob), stored opaque
    pub image: String,

    pub remark: String,

    /// Mutable after creation
    #[serde(rename = "paymentStatus")]
    pub payment_status: bool,

    /// Mutable after creation
    #[serde(rename = "violationStatus")]
    pub violation_status: bool,

    /// Owning driver, immutable
    #[serde(rename = "driverID")]
    pub driver_id: String,

    /// Issuing admin, immutable
    #[serde(rename = "adminID")]
    pub admin_id: String,

    #[serde(rename = "objectType")]
    pub object_type: ObjectType,
}

impl Violation {
    /// Issue a violation from a draft on behalf of `admin_id`
    pub fn issue(draft: ViolationDraft, admin_id: impl Into<String>) -> Self {
        Self {
            violation_id: draft.violation_id,
            violation_type: draft.violation_type,
            location: draft.location,
            penalty_amount: draft.penalty_amount,
            timestamp: draft.timestamp,
            license_plate_number: draft.license_plate_number,
            image: draft.image,
            remark: draft.remark,
            payment_status: draft.payment_status,
            violation_status: draft.violation_status,
            driver_id: draft.driver_id,
            admin_id: admin_id.into(),
            object_type: ObjectType::Violation,
        }
    }

    /// Set the two mutable status flags, leaving every other field as is
    pub fn set_status(&mut self, payment_status: bool, violation_status: bool) {
        self.payment_status = payment_status;
        self.violation_status = violation_status;
    }

    pub fn is_owned_by(&self, caller_id: &str) -> bool {
        self.driver_id == caller_id
    }
}

impl Document for Violation {
    const OBJECT_TYPE: ObjectType = ObjectType::Violation;

    fn record_id(&self) -> &str {
        &self.violation_id
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: String,

    pub role: Role,

    /// Older user documents carry no discriminator
    #[serde(rename = "objectType", default = "user_object_type")]
    pub object_type: ObjectType,
}

fn user_object_type() -> ObjectType {
    ObjectType::User
}

impl User {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            object_type: ObjectType::User,
        }
    }
}

impl Document for User {
    const OBJECT_TYPE: ObjectType = ObjectType::User;

    fn record_id(&self) -> &str {
        &self.user_id
    }
}

/// Caller-supplied fields of a new appeal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppealDraft {
    pub appeal_id: String,
    pub violation_id: String,
    pub appeal_text: String,
    pub evidence: String,
    pub timestamp: String,
}

/// Driver appeal against a violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appeal {
    #[serde(rename = "appealID")]
    pub appeal_id: String,

    #[serde(rename = "violationID")]
    pub violation_id: String,

    #[serde(rename = "driverID")]
    pub driver_id: String,

    #[serde(rename = "appealText")]
    pub appeal_text: String,

    pub evidence: String,

    pub timestamp: String,

    /// Open set: "Pending" on submission, then whatever the reviewing admin sets
    pub status: String,

    #[serde(rename = "objectType")]
    pub object_type: ObjectType,
}

impl Appeal {
    /// Submit an appeal from a draft on behalf of `driver_id`
    pub fn submit(draft: AppealDraft, driver_id: impl Into<String>) -> Self {
        Self {
            appeal_id: draft.appeal_id,
            violation_id: draft.violation_id,
            driver_id: driver_id.into(),
            appeal_text: draft.appeal_text,
            evidence: draft.evidence,
            timestamp: draft.timestamp,
            status: APPEAL_STATUS_PENDING.to_string(),
            object_type: ObjectType::Appeal,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == APPEAL_STATUS_PENDING
    }
}

impl Document for Appeal {
    const OBJECT_TYPE: ObjectType = ObjectType::Appeal;

    fn record_id(&self) -> &str {
        &self.appeal_id
    }
}
