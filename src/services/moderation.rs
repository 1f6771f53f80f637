// ============================================================================
// Admin moderation: filtering, cached record lists, notifications
// ============================================================================
//
// Filtering is a pure function of (records, query, status filter) and is
// recomputed on every read of `ModerationBoard::view`. The board keeps a
// cached copy of the server list; mutations patch that copy only after the
// backend confirmed them, or trigger a full refetch depending on the
// board's reconcile policy.
//
// ============================================================================

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::str::FromStr;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::inquiry_service::InquiryService;
use crate::middleware::error_handling::Result;
use crate::models::{
    Blog, BookingInquiry, Car, ContactMessage, Failure, InquiryStatus, Outcome,
};

// ============================================================================
// Filtering
// ============================================================================

pub trait Searchable {
    /// Fields matched by the free-text query.
    fn search_fields(&self) -> Vec<&str>;

    /// Records without a status ignore the status filter.
    fn inquiry_status(&self) -> Option<InquiryStatus> {
        None
    }
}

pub trait Identified {
    fn record_id(&self) -> Uuid;
}

impl Searchable for BookingInquiry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.phone.as_str(),
            self.pickup_location.as_str(),
            self.drop_location.as_str(),
        ]
    }

    fn inquiry_status(&self) -> Option<InquiryStatus> {
        Some(self.status)
    }
}

impl Searchable for ContactMessage {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.message.as_str(),
        ]
    }
}

impl Searchable for Blog {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl Searchable for Car {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Identified for BookingInquiry {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Identified for ContactMessage {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Blog {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Car {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InquiryStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: Option<InquiryStatus>) -> bool {
        match (self, status) {
            (StatusFilter::All, _) | (_, None) => true,
            (StatusFilter::Only(wanted), Some(status)) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    /// `"all"` (or empty) disables the filter; anything else must be a status.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.to_ascii_lowercase().parse().map(StatusFilter::Only)
    }
}

/// Case-insensitive substring match of the raw query; only an empty query
/// matches everything.
pub fn matches_query<T: Searchable>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records matching both the query and the status filter, in their original order.
pub fn filter_records<T: Searchable + Clone>(records: &[T], query: &str, status: StatusFilter) -> Vec<T> {
    records
        .iter()
        .filter(|r| status.accepts(r.inquiry_status()) && matches_query(*r, query))
        .cloned()
        .collect()
}

pub fn filter_bookings(records: &[BookingInquiry], query: &str, status: StatusFilter) -> Vec<BookingInquiry> {
    filter_records(records, query, status)
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub ttl: Duration,
    created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Pending user-facing messages, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, ttl: Duration) {
        self.entries.push_back(Notification {
            kind,
            message: message.into(),
            ttl,
            created_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message, DEFAULT_NOTIFICATION_TTL);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message, DEFAULT_NOTIFICATION_TTL);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message, DEFAULT_NOTIFICATION_TTL);
    }

    pub fn prune_expired(&mut self, now: Instant) {
        self.entries.retain(|n| !n.is_expired(now));
    }

    /// Live notifications after pruning.
    pub fn active(&mut self, now: Instant) -> Vec<Notification> {
        self.prune_expired(now);
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Moderation board
// ============================================================================

#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Apply the record returned by the mutation to the cached list.
    Patch,
    /// Reload the whole list from the source.
    Refetch,
}

pub struct ModerationBoard<T> {
    records: Vec<T>,
    query: String,
    status_filter: StatusFilter,
    in_flight: HashSet<Uuid>,
    policy: ReconcilePolicy,
    pub notifications: NotificationQueue,
}

impl<T> ModerationBoard<T>
where
    T: Searchable + Identified + Clone + Send,
{
    pub fn new(policy: ReconcilePolicy) -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            status_filter: StatusFilter::All,
            in_flight: HashSet::new(),
            policy,
            notifications: NotificationQueue::new(),
        }
    }

    pub fn with_records(policy: ReconcilePolicy, records: Vec<T>) -> Self {
        let mut board = Self::new(policy);
        board.records = records;
        board
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn view(&self) -> Vec<T> {
        filter_records(&self.records, &self.query, self.status_filter)
    }

    /// Replaces the cache with the source's list. On failure the cache is
    /// left as it was and an error notification is queued.
    pub async fn refetch(&mut self, source: &(dyn RecordSource<T> + '_)) -> bool {
        match source.fetch_all().await {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(e) => {
                tracing::error!("❌ Failed to refresh moderation list: {:?}", e);
                self.notifications.error("Failed to load records");
                false
            }
        }
    }

    /// Marks `id` as having a mutation in flight. Returns `false` if one is
    /// already running, in which case the caller must not submit again.
    pub fn begin(&mut self, id: Uuid) -> bool {
        self.in_flight.insert(id)
    }

    pub fn finish(&mut self, id: Uuid) {
        self.in_flight.remove(&id);
    }

    pub fn is_in_flight(&self, id: Uuid) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn patch(&mut self, id: Uuid, apply: impl FnOnce(&mut T)) -> bool {
        match self.records.iter_mut().find(|r| r.record_id() == id) {
            Some(record) => {
                apply(record);
                true
            }
            None => false,
        }
    }

    /// Swaps in the server's copy of a record; unknown records are prepended.
    pub fn replace(&mut self, record: T) {
        let id = record.record_id();
        match self.records.iter_mut().find(|r| r.record_id() == id) {
            Some(slot) => *slot = record,
            None => self.records.insert(0, record),
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let index = self.records.iter().position(|r| r.record_id() == id)?;
        Some(self.records.remove(index))
    }

    /// Brings the cache in line after a confirmed mutation.
    pub async fn reconcile(&mut self, updated: T, source: &(dyn RecordSource<T> + '_)) {
        match self.policy {
            ReconcilePolicy::Patch => self.replace(updated),
            ReconcilePolicy::Refetch => {
                if !self.refetch(source).await {
                    self.replace(updated);
                }
            }
        }
    }
}

/// Status change as driven from the admin inquiry list.
///
/// The cached list only changes after the backend confirmed the update; a
/// failure leaves it untouched and queues an error notification.
pub async fn apply_status_change(
    board: &mut ModerationBoard<BookingInquiry>,
    service: &InquiryService,
    id: Uuid,
    status: InquiryStatus,
) -> Outcome<BookingInquiry> {
    if !board.begin(id) {
        return Outcome::Failure(Failure::validation(
            "An update for this inquiry is already in progress",
        ));
    }

    let outcome = service.update_booking_inquiry_status(id, status).await;
    match &outcome {
        Outcome::Success(updated) => {
            board.reconcile(updated.clone(), service).await;
            board
                .notifications
                .success(format!("Booking status updated to {}", updated.status));
        }
        Outcome::Failure(failure) => {
            board.notifications.error(failure.message.clone());
        }
    }

    board.finish(id);
    outcome
}
