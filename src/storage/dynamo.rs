//! DynamoDB-backed stores. One table per entity, point reads/writes by
//! primary key plus full scans; no condition expressions or transactions,
//! so concurrent writers are last-write-wins.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, NaiveDate, Utc};

use crate::model::document::Document;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::storage::{DocumentStore, EmployeeStore, LeaveRequestStore, StorageError};

type Item = HashMap<String, AttributeValue>;

fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

fn get_s(item: &Item, key: &str) -> Result<String, StorageError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StorageError::Read(format!("missing or non-string attribute '{key}'")))
}

fn get_opt_s(item: &Item, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_s().ok()).cloned()
}

fn get_bool(item: &Item, key: &str) -> bool {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .unwrap_or(false)
}

fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, StorageError> {
    let raw = get_s(item, key)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Read(format!("bad timestamp in '{key}': {e}")))
}

fn get_date(item: &Item, key: &str) -> Result<NaiveDate, StorageError> {
    let raw = get_s(item, key)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| StorageError::Read(format!("bad date in '{key}': {e}")))
}

/// Scan the whole table, following pagination.
async fn scan_all(client: &Client, table: &str) -> Result<Vec<Item>, StorageError> {
    let mut items = Vec::new();
    let mut start_key: Option<Item> = None;

    loop {
        let resp = client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(start_key.take())
            .send()
            .await
            .map_err(|e| StorageError::Read(format!("scan {table}: {e}")))?;

        items.extend(resp.items().iter().cloned());

        match resp.last_evaluated_key() {
            Some(key) => start_key = Some(key.clone()),
            None => break,
        }
    }

    Ok(items)
}

async fn get_item(client: &Client, table: &str, key: &str, id: &str) -> Result<Option<Item>, StorageError> {
    let resp = client
        .get_item()
        .table_name(table)
        .key(key, s(id))
        .send()
        .await
        .map_err(|e| StorageError::Read(format!("get {table}: {e}")))?;
    Ok(resp.item)
}

async fn put_item(client: &Client, table: &str, item: Item) -> Result<(), StorageError> {
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await
        .map_err(|e| StorageError::Write(format!("put {table}: {e}")))?;
    Ok(())
}

async fn delete_item(client: &Client, table: &str, key: &str, id: &str) -> Result<(), StorageError> {
    client
        .delete_item()
        .table_name(table)
        .key(key, s(id))
        .send()
        .await
        .map_err(|e| StorageError::Write(format!("delete {table}: {e}")))?;
    Ok(())
}

// ---------- employees (keyed by email) ----------

pub struct DynamoEmployeeStore {
    client: Client,
    table: String,
}

impl DynamoEmployeeStore {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

fn employee_to_item(e: &Employee) -> Item {
    let mut item = Item::new();
    item.insert("email".into(), s(&e.email));
    item.insert("employee_id".into(), s(&e.employee_id));
    item.insert("name".into(), s(&e.name));
    item.insert("department".into(), s(&e.department));
    item.insert("position".into(), s(&e.position));
    item.insert("password".into(), s(&e.password_hash));
    item.insert("role_id".into(), AttributeValue::N(e.role.as_id().to_string()));
    item.insert("created_at".into(), s(e.created_at.to_rfc3339()));
    item.insert("created_by".into(), s(&e.created_by));
    item
}

fn employee_from_item(item: &Item) -> Result<Employee, StorageError> {
    let role_id: u8 = item
        .get("role_id")
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StorageError::Read("missing or bad 'role_id'".into()))?;
    let role = Role::from_id(role_id)
        .ok_or_else(|| StorageError::Read(format!("unknown role id {role_id}")))?;

    Ok(Employee {
        email: get_s(item, "email")?,
        employee_id: get_s(item, "employee_id")?,
        name: get_s(item, "name")?,
        department: get_s(item, "department")?,
        position: get_s(item, "position")?,
        password_hash: get_s(item, "password")?,
        role,
        created_at: get_datetime(item, "created_at")?,
        created_by: get_s(item, "created_by")?,
    })
}

#[async_trait]
impl EmployeeStore for DynamoEmployeeStore {
    async fn get(&self, email: &str) -> Result<Option<Employee>, StorageError> {
        match get_item(&self.client, &self.table, "email", email).await? {
            Some(item) => Ok(Some(employee_from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, employee: &Employee) -> Result<(), StorageError> {
        put_item(&self.client, &self.table, employee_to_item(employee)).await
    }

    async fn scan(&self) -> Result<Vec<Employee>, StorageError> {
        scan_all(&self.client, &self.table)
            .await?
            .iter()
            .map(employee_from_item)
            .collect()
    }

    async fn delete(&self, email: &str) -> Result<(), StorageError> {
        delete_item(&self.client, &self.table, "email", email).await
    }
}

// ---------- leave requests (keyed by request_id) ----------

pub struct DynamoLeaveRequestStore {
    client: Client,
    table: String,
}

impl DynamoLeaveRequestStore {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

fn leave_to_item(r: &LeaveRequest) -> Item {
    let mut item = Item::new();
    item.insert("request_id".into(), s(&r.request_id));
    item.insert("employee_id".into(), s(&r.employee_id));
    item.insert("start_date".into(), s(r.start_date.format("%Y-%m-%d").to_string()));
    item.insert("end_date".into(), s(r.end_date.format("%Y-%m-%d").to_string()));
    item.insert("reason".into(), s(&r.reason));
    item.insert("status".into(), s(r.status.as_str()));
    item.insert("created_at".into(), s(r.created_at.to_rfc3339()));
    if let Some(by) = &r.decided_by {
        item.insert("decided_by".into(), s(by));
    }
    if let Some(at) = &r.decided_at {
        item.insert("decided_at".into(), s(at.to_rfc3339()));
    }
    item
}

fn leave_from_item(item: &Item) -> Result<LeaveRequest, StorageError> {
    let raw_status = get_s(item, "status")?;
    let status = LeaveStatus::from_str(&raw_status)
        .ok_or_else(|| StorageError::Read(format!("unknown leave status '{raw_status}'")))?;

    let decided_at = match get_opt_s(item, "decided_at") {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StorageError::Read(format!("bad timestamp in 'decided_at': {e}")))?,
        ),
        None => None,
    };

    Ok(LeaveRequest {
        request_id: get_s(item, "request_id")?,
        employee_id: get_s(item, "employee_id")?,
        start_date: get_date(item, "start_date")?,
        end_date: get_date(item, "end_date")?,
        reason: get_s(item, "reason")?,
        status,
        created_at: get_datetime(item, "created_at")?,
        decided_by: get_opt_s(item, "decided_by"),
        decided_at,
    })
}

#[async_trait]
impl LeaveRequestStore for DynamoLeaveRequestStore {
    async fn get(&self, request_id: &str) -> Result<Option<LeaveRequest>, StorageError> {
        match get_item(&self.client, &self.table, "request_id", request_id).await? {
            Some(item) => Ok(Some(leave_from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, request: &LeaveRequest) -> Result<(), StorageError> {
        put_item(&self.client, &self.table, leave_to_item(request)).await
    }

    async fn scan(&self) -> Result<Vec<LeaveRequest>, StorageError> {
        scan_all(&self.client, &self.table)
            .await?
            .iter()
            .map(leave_from_item)
            .collect()
    }
}

// ---------- documents (keyed by document_id) ----------

pub struct DynamoDocumentStore {
    client: Client,
    table: String,
}

impl DynamoDocumentStore {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

fn document_to_item(d: &Document) -> Item {
    let mut item = Item::new();
    item.insert("document_id".into(), s(&d.document_id));
    item.insert("employee_id".into(), s(&d.employee_id));
    item.insert("filename".into(), s(&d.filename));
    item.insert("description".into(), s(&d.description));
    item.insert("blob_key".into(), s(&d.blob_key));
    item.insert("content_type".into(), s(&d.content_type));
    item.insert("created_at".into(), s(d.created_at.to_rfc3339()));
    item.insert("is_public".into(), AttributeValue::Bool(d.is_public));
    item
}

fn document_from_item(item: &Item) -> Result<Document, StorageError> {
    Ok(Document {
        document_id: get_s(item, "document_id")?,
        employee_id: get_s(item, "employee_id")?,
        filename: get_s(item, "filename")?,
        description: get_opt_s(item, "description").unwrap_or_default(),
        blob_key: get_s(item, "blob_key")?,
        content_type: get_opt_s(item, "content_type")
            .unwrap_or_else(|| "application/octet-stream".into()),
        created_at: get_datetime(item, "created_at")?,
        is_public: get_bool(item, "is_public"),
    })
}

#[async_trait]
impl DocumentStore for DynamoDocumentStore {
    async fn get(&self, document_id: &str) -> Result<Option<Document>, StorageError> {
        match get_item(&self.client, &self.table, "document_id", document_id).await? {
            Some(item) => Ok(Some(document_from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, document: &Document) -> Result<(), StorageError> {
        put_item(&self.client, &self.table, document_to_item(document)).await
    }

    async fn scan(&self) -> Result<Vec<Document>, StorageError> {
        scan_all(&self.client, &self.table)
            .await?
            .iter()
            .map(document_from_item)
            .collect()
    }

    async fn delete(&self, document_id: &str) -> Result<(), StorageError> {
        delete_item(&self.client, &self.table, "document_id", document_id).await
    }
}
