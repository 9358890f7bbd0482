//! CLI commands
//!
//! Each command runs one contract operation as the context's caller and
//! returns the JSON document to print.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use trafficledger_contract::{ContractError, ErrorKind};
use trafficledger_core::{AppealDraft, IdentityError, ViolationDraft};
use uuid::Uuid;

use crate::context::AppContext;

/// Fields of a new violation as entered on the command line
#[derive(Debug, Clone, Default)]
pub struct ViolationInput {
    pub violation_id: String,
    pub driver_id: String,
    pub violation_type: String,
    pub location: String,
    pub penalty_amount: i64,
    pub timestamp: Option<String>,
    pub license_plate_number: String,
    pub image: String,
    pub remark: String,
    pub payment_status: bool,
    pub violation_status: bool,
}

/// Fields of a new appeal as entered on the command line
#[derive(Debug, Clone, Default)]
pub struct AppealInput {
    pub appeal_id: Option<String>,
    pub violation_id: String,
    pub appeal_text: String,
    pub evidence: String,
    pub timestamp: Option<String>,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Register the caller (or anyone) as a user with the given role
pub fn register(ctx: &AppContext, user_id: &str, role: &str) -> anyhow::Result<Value> {
    let user = ctx.contract().create_user(ctx.caller(), user_id, role)?;
    Ok(serde_json::to_value(user)?)
}

pub fn create_violation(ctx: &AppContext, input: ViolationInput) -> anyhow::Result<Value> {
    let draft = ViolationDraft {
        violation_id: input.violation_id,
        driver_id: input.driver_id,
        violation_type: input.violation_type,
        location: input.location,
        penalty_amount: input.penalty_amount,
        timestamp: input.timestamp.unwrap_or_else(now_rfc3339),
        license_plate_number: input.license_plate_number,
        image: input.image,
        remark: input.remark,
        payment_status: input.payment_status,
        violation_status: input.violation_status,
    };
    let violation = ctx.contract().create_violation(ctx.caller(), draft)?;
    Ok(serde_json::to_value(violation)?)
}

pub fn delete_violation(ctx: &AppContext, violation_id: &str) -> anyhow::Result<Value> {
    ctx.contract().delete_violation(ctx.caller(), violation_id)?;
    Ok(json!({ "deleted": violation_id }))
}

pub fn update_violation(
    ctx: &AppContext,
    violation_id: &str,
    payment_status: bool,
    violation_status: bool,
) -> anyhow::Result<Value> {
    let violation =
        ctx.contract()
            .update_violation(ctx.caller(), violation_id, payment_status, violation_status)?;
    Ok(serde_json::to_value(violation)?)
}

pub fn query_violation(ctx: &AppContext, violation_id: &str) -> anyhow::Result<Value> {
    let violation = ctx.contract().query_violation(ctx.caller(), violation_id)?;
    Ok(serde_json::to_value(violation)?)
}

pub fn query_all_violations(ctx: &AppContext) -> anyhow::Result<Value> {
    let violations = ctx.contract().query_all_violations(ctx.caller())?.collect_all()?;
    Ok(serde_json::to_value(violations)?)
}

pub fn query_my_violations(ctx: &AppContext) -> anyhow::Result<Value> {
    let violations = ctx.contract().query_my_violations(ctx.caller())?.collect_all()?;
    Ok(serde_json::to_value(violations)?)
}

/// Submit an appeal; a missing id gets a fresh UUID
pub fn submit_appeal(ctx: &AppContext, input: AppealInput) -> anyhow::Result<Value> {
    let draft = AppealDraft {
        appeal_id: input.appeal_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        violation_id: input.violation_id,
        appeal_text: input.appeal_text,
        evidence: input.evidence,
        timestamp: input.timestamp.unwrap_or_else(now_rfc3339),
    };
    let appeal = ctx.contract().submit_appeal(ctx.caller(), draft)?;
    Ok(serde_json::to_value(appeal)?)
}

pub fn query_my_appeals(ctx: &AppContext) -> anyhow::Result<Value> {
    let appeals = ctx.contract().query_my_appeals(ctx.caller())?.collect_all()?;
    Ok(serde_json::to_value(appeals)?)
}

pub fn query_all_appeals(ctx: &AppContext) -> anyhow::Result<Value> {
    let appeals = ctx.contract().query_all_appeals(ctx.caller())?.collect_all()?;
    Ok(serde_json::to_value(appeals)?)
}

pub fn update_appeal_status(ctx: &AppContext, appeal_id: &str, status: &str) -> anyhow::Result<Value> {
    let appeal = ctx.contract().update_appeal_status(ctx.caller(), appeal_id, status)?;
    Ok(serde_json::to_value(appeal)?)
}

pub fn delete_appeal(ctx: &AppContext, appeal_id: &str) -> anyhow::Result<Value> {
    ctx.contract().delete_appeal(ctx.caller(), appeal_id)?;
    Ok(json!({ "deleted": appeal_id }))
}

/// Caller id and role attribute as the ledger sees them
pub fn whoami(ctx: &AppContext) -> anyhow::Result<Value> {
    let contract = ctx.contract();
    let id = contract.get_client_id(ctx.caller())?;
    let role = contract.get_client_role(ctx.caller())?;
    Ok(json!({ "id": id, "role": role }))
}

/// Process exit status for a failed command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ContractError>() {
        return match err.kind() {
            ErrorKind::InvalidArgument => 2,
            ErrorKind::AccessDenied => 3,
            ErrorKind::NotFound => 4,
            ErrorKind::AlreadyExists => 5,
            ErrorKind::InvalidReference => 6,
            ErrorKind::StoreFailure | ErrorKind::DecodeFailure => 1,
        };
    }
    if err.downcast_ref::<IdentityError>().is_some() {
        return 2;
    }
    1
}
