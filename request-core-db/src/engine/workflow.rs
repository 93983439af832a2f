use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use heapless::String as HeaplessString;
use tracing::info;
use validator::Validate;

use request_core_api::domain::{Actor, RequestStatus};
use request_core_api::error::{WorkflowError, WorkflowResult};
use request_core_api::service::RequestWorkflow;

use crate::models::request::{
    CustomerRequestModel, HistoryEntryModel, RequestDraft, RequestPatch,
};
use crate::repository::RequestStore;

/// Counter name for the given two-digit year, e.g. `request_25`.
pub fn counter_name(year_two_digits: u32) -> String {
    format!("request_{year_two_digits:02}")
}

/// Format a request id: `CRA{YY}{0000}`.
///
/// The sequence is zero-padded to four digits and widens beyond 9999 rather
/// than failing; uniqueness is the contract, not the width. A sequence too
/// wide even for the id capacity is an error, never a truncated id.
pub fn format_request_id(
    year_two_digits: u32,
    sequence: i64,
) -> WorkflowResult<HeaplessString<20>> {
    let id = format!("CRA{year_two_digits:02}{sequence:04}");
    HeaplessString::try_from(id.as_str()).map_err(|_| {
        WorkflowError::StorageError(format!("Request id {id} exceeds the id capacity"))
    })
}

/// The status engine: the only entry point through which a request's status
/// and history may change.
///
/// Owns an injected [`RequestStore`]; every mutation is a read-modify-write
/// of the whole document, written under compare-and-swap on the record's
/// version counter so concurrent writers surface as `Conflict` instead of
/// silently overwriting each other.
pub struct RequestWorkflowEngine<R> {
    store: R,
}

impl<R: RequestStore> RequestWorkflowEngine<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// The underlying store, e.g. for health checks.
    pub fn store(&self) -> &R {
        &self.store
    }

    async fn load_or_not_found(&self, id: &str) -> WorkflowResult<CustomerRequestModel> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("Request {id}")))
    }

    /// Validate stage-specific data for entering `status` and produce the
    /// comment to record on the history entry. May stage a field write onto
    /// `model` (the clarification comment), which lands in the same atomic
    /// update as the transition itself.
    fn prepare_stage_data(
        model: &mut CustomerRequestModel,
        status: RequestStatus,
        comment: Option<&str>,
    ) -> WorkflowResult<Option<String>> {
        let given = comment.map(str::trim).filter(|c| !c.is_empty());

        match status {
            RequestStatus::Submitted if model.status == RequestStatus::ClarificationNeeded => {
                let response_given = model
                    .clarification_response
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|r| !r.is_empty());
                if !response_given {
                    return Err(WorkflowError::ValidationError(
                        "Resubmission requires a clarification response".into(),
                    ));
                }
            }
            RequestStatus::ClarificationNeeded => {
                let stored = model
                    .clarification_comment
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty());
                match (stored, given) {
                    (None, Some(text)) => {
                        model.clarification_comment = Some(text.to_string());
                    }
                    (None, None) => {
                        return Err(WorkflowError::ValidationError(
                            "Requesting clarification requires a comment".into(),
                        ));
                    }
                    _ => {}
                }
            }
            RequestStatus::FeasibilityConfirmed => {
                let message_given = model
                    .acceptance_message
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|m| !m.is_empty());
                if !message_given {
                    return Err(WorkflowError::ValidationError(
                        "Confirming feasibility requires an acceptance message".into(),
                    ));
                }
                if model.expected_design_reply_date.is_none() {
                    return Err(WorkflowError::ValidationError(
                        "Confirming feasibility requires an expected design reply date".into(),
                    ));
                }
            }
            RequestStatus::CostingComplete => {
                let price = model.selling_price.ok_or_else(|| {
                    WorkflowError::ValidationError(
                        "Completing costing requires a selling price".into(),
                    )
                })?;
                if !price.is_finite() || price <= 0.0 {
                    return Err(WorkflowError::ValidationError(
                        "Selling price must be a positive number".into(),
                    ));
                }
                let margin = model.calculated_margin.ok_or_else(|| {
                    WorkflowError::ValidationError(
                        "Completing costing requires a calculated margin".into(),
                    )
                })?;
                if !margin.is_finite() {
                    return Err(WorkflowError::ValidationError(
                        "Calculated margin must be a number".into(),
                    ));
                }
                // The pricing summary is the transition comment.
                return Ok(Some(format!(
                    "Selling Price: €{price:.2}, Margin: {margin:.1}%"
                )));
            }
            _ => {}
        }

        Ok(given.map(str::to_string))
    }

    fn append_history(
        model: &mut CustomerRequestModel,
        status: RequestStatus,
        actor: &Actor,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let entry = HistoryEntryModel {
            id: HistoryEntryModel::next_id(&model.history, now)?,
            status,
            timestamp: now,
            user_id: actor.user_id.clone(),
            user_name: actor.user_name.clone(),
            comment,
        };
        model.history.push(entry);
        model.status = status;
        Ok(())
    }
}

#[async_trait]
impl<R: RequestStore> RequestWorkflow for RequestWorkflowEngine<R> {
    type Record = CustomerRequestModel;
    type Draft = RequestDraft;
    type Patch = RequestPatch;

    async fn create_request(
        &self,
        draft: RequestDraft,
        actor: &Actor,
    ) -> WorkflowResult<CustomerRequestModel> {
        draft
            .validate()
            .map_err(|e| WorkflowError::ValidationError(e.to_string()))?;
        if !draft.status.is_initial() {
            return Err(WorkflowError::ValidationError(format!(
                "A request cannot be created in status {}",
                draft.status
            )));
        }

        let now = Utc::now();
        let year = (now.year() % 100) as u32;
        let sequence = self.store.next_sequence(&counter_name(year)).await?;
        let id = format_request_id(year, sequence)?;

        let model = draft.into_model(id, actor, now)?;
        self.store.create(&model).await?;

        info!(id = %model.id, status = %model.status, user = %actor.user_id, "request created");
        Ok(model)
    }

    async fn get_request(&self, id: &str) -> WorkflowResult<CustomerRequestModel> {
        self.load_or_not_found(id).await
    }

    async fn list_requests(&self) -> WorkflowResult<Vec<CustomerRequestModel>> {
        self.store.list().await
    }

    async fn update_request_fields(
        &self,
        id: &str,
        patch: RequestPatch,
    ) -> WorkflowResult<CustomerRequestModel> {
        let mut model = self.load_or_not_found(id).await?;
        let expected_version = model.version;

        if patch.products.as_ref().is_some_and(|products| products.is_empty()) {
            return Err(WorkflowError::ValidationError(
                "A request carries at least one product".into(),
            ));
        }

        patch.apply_to(&mut model);
        model.updated_at = Utc::now();
        model.version += 1;

        self.store.update(&model, expected_version).await?;
        Ok(model)
    }

    async fn apply_transition(
        &self,
        id: &str,
        status: RequestStatus,
        actor: &Actor,
        comment: Option<&str>,
    ) -> WorkflowResult<CustomerRequestModel> {
        let mut model = self.load_or_not_found(id).await?;
        let from = model.status;

        if !from.can_transition_to(status) {
            return Err(WorkflowError::IllegalTransition { from, to: status });
        }
        if !actor.role.may_enter(status) {
            return Err(WorkflowError::ValidationError(format!(
                "Role {} may not move a request into {status}",
                actor.role
            )));
        }

        let entry_comment = Self::prepare_stage_data(&mut model, status, comment)?;

        let expected_version = model.version;
        let now = Utc::now();
        Self::append_history(&mut model, status, actor, entry_comment, now)?;
        model.updated_at = now;
        model.version += 1;

        self.store.update(&model, expected_version).await?;

        info!(id = %model.id, %from, to = %status, user = %actor.user_id, "request transitioned");
        Ok(model)
    }

    async fn delete_request(&self, id: &str) -> WorkflowResult<()> {
        if !self.store.delete(id).await? {
            return Err(WorkflowError::NotFound(format!("Request {id}")));
        }
        info!(id, "request deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use request_core_api::domain::UserRole;

    use crate::engine::test_store::MemoryStore;
    use crate::repository::NextSequence;

    fn sales() -> Actor {
        Actor::new("2", "Leo", UserRole::Sales).unwrap()
    }

    fn design() -> Actor {
        Actor::new("4", "Phoebe", UserRole::Design).unwrap()
    }

    fn costing() -> Actor {
        Actor::new("5", "Bai", UserRole::Costing).unwrap()
    }

    fn admin() -> Actor {
        Actor::new("1", "Renaud", UserRole::Admin).unwrap()
    }

    fn engine() -> RequestWorkflowEngine<MemoryStore> {
        RequestWorkflowEngine::new(MemoryStore::new())
    }

    fn submitted_draft() -> RequestDraft {
        RequestDraft {
            status: RequestStatus::Submitted,
            client_name: "ACME Trailers".into(),
            ..RequestDraft::default()
        }
    }

    /// Seed a request directly in `status`, with a consistent history.
    async fn seed_in_status(
        engine: &RequestWorkflowEngine<MemoryStore>,
        status: RequestStatus,
    ) -> CustomerRequestModel {
        let mut model = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        if status != RequestStatus::Draft {
            model.status = status;
            model.history[0].status = status;
        }
        engine.store.insert_raw(model.clone());
        model
    }

    #[tokio::test]
    async fn create_assigns_sequential_padded_ids() {
        let engine = engine();
        let year = (Utc::now().year() % 100) as u32;

        let first = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        let second = engine
            .create_request(submitted_draft(), &sales())
            .await
            .unwrap();

        assert_eq!(first.id.as_str(), format!("CRA{year:02}0001"));
        assert_eq!(second.id.as_str(), format!("CRA{year:02}0002"));
        assert_eq!(first.history.len(), 1);
        assert_eq!(first.history[0].status, RequestStatus::Draft);
        assert!(first.is_history_consistent());
    }

    #[tokio::test]
    async fn create_rejects_non_initial_status_and_missing_products() {
        let engine = engine();

        let mut draft = RequestDraft::default();
        draft.products.clear();
        assert!(matches!(
            engine.create_request(draft, &sales()).await,
            Err(WorkflowError::ValidationError(_))
        ));

        let draft = RequestDraft {
            status: RequestStatus::InCosting,
            ..RequestDraft::default()
        };
        assert!(matches!(
            engine.create_request(draft, &sales()).await,
            Err(WorkflowError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn lifecycle_scenario_keeps_status_and_history_in_lockstep() {
        let engine = engine();
        let created = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        let id = created.id.as_str().to_string();
        assert_eq!(created.status, RequestStatus::Draft);
        assert_eq!(created.history.len(), 1);

        let submitted = engine
            .apply_transition(&id, RequestStatus::Submitted, &sales(), None)
            .await
            .unwrap();
        assert_eq!(submitted.status, RequestStatus::Submitted);
        assert_eq!(submitted.history.len(), 2);
        assert_eq!(submitted.history[1].status, RequestStatus::Submitted);
        assert!(submitted.is_history_consistent());

        let clarification = engine
            .apply_transition(
                &id,
                RequestStatus::ClarificationNeeded,
                &design(),
                Some("Need torque spec"),
            )
            .await
            .unwrap();
        assert_eq!(clarification.history.len(), 3);
        assert_eq!(
            clarification.history[2].comment.as_deref(),
            Some("Need torque spec")
        );
        // The clarification text is persisted in the same write.
        assert_eq!(
            clarification.clarification_comment.as_deref(),
            Some("Need torque spec")
        );
        assert!(clarification.is_history_consistent());

        engine
            .update_request_fields(
                &id,
                RequestPatch {
                    clarification_response: Some("Torque spec attached".into()),
                    ..RequestPatch::default()
                },
            )
            .await
            .unwrap();

        let resubmitted = engine
            .apply_transition(&id, RequestStatus::Submitted, &sales(), None)
            .await
            .unwrap();
        assert_eq!(resubmitted.history.len(), 4);
        assert!(resubmitted.is_history_consistent());

        // History ids stay strictly increasing.
        let mut ids: Vec<i64> = resubmitted
            .history
            .iter()
            .map(|e| e.id.strip_prefix("h-").unwrap().parse().unwrap())
            .collect();
        let sorted = ids.clone();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn resubmission_without_clarification_response_is_rejected() {
        let engine = engine();
        let model = seed_in_status(&engine, RequestStatus::ClarificationNeeded).await;

        let result = engine
            .apply_transition(model.id.as_str(), RequestStatus::Submitted, &sales(), None)
            .await;
        assert!(matches!(result, Err(WorkflowError::ValidationError(_))));
    }

    #[tokio::test]
    async fn every_pair_outside_the_table_is_rejected_without_a_write() {
        let engine = engine();

        for from in RequestStatus::ALL {
            let model = seed_in_status(&engine, from).await;
            let id = model.id.as_str().to_string();
            let before = engine.store.raw_document(&id).unwrap();

            for to in RequestStatus::ALL {
                if from.can_transition_to(to) {
                    continue;
                }
                let result = engine.apply_transition(&id, to, &admin(), None).await;
                match result {
                    Err(WorkflowError::IllegalTransition { from: f, to: t }) => {
                        assert_eq!(f, from);
                        assert_eq!(t, to);
                    }
                    other => panic!("{from} -> {to} should be illegal, got {other:?}"),
                }
                assert_eq!(
                    engine.store.raw_document(&id).unwrap(),
                    before,
                    "stored document must be untouched after rejected {from} -> {to}"
                );
            }
        }
    }

    #[tokio::test]
    async fn role_gate_blocks_wrong_role_even_on_legal_transitions() {
        let engine = engine();
        let model = seed_in_status(&engine, RequestStatus::Submitted).await;

        // under_review is reachable from submitted, but not by costing.
        let result = engine
            .apply_transition(
                model.id.as_str(),
                RequestStatus::UnderReview,
                &costing(),
                None,
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::ValidationError(_))));

        engine
            .apply_transition(model.id.as_str(), RequestStatus::UnderReview, &design(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn clarification_needed_requires_a_comment() {
        let engine = engine();
        let model = seed_in_status(&engine, RequestStatus::Submitted).await;

        let result = engine
            .apply_transition(
                model.id.as_str(),
                RequestStatus::ClarificationNeeded,
                &design(),
                None,
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::ValidationError(_))));
    }

    #[tokio::test]
    async fn feasibility_requires_message_and_reply_date() {
        let engine = engine();
        let model = seed_in_status(&engine, RequestStatus::UnderReview).await;
        let id = model.id.as_str().to_string();

        let result = engine
            .apply_transition(&id, RequestStatus::FeasibilityConfirmed, &design(), None)
            .await;
        assert!(matches!(result, Err(WorkflowError::ValidationError(_))));

        engine
            .update_request_fields(
                &id,
                RequestPatch {
                    acceptance_message: Some("Feasible with minor changes".into()),
                    expected_design_reply_date: Some(Utc::now()),
                    ..RequestPatch::default()
                },
            )
            .await
            .unwrap();

        let confirmed = engine
            .apply_transition(&id, RequestStatus::FeasibilityConfirmed, &design(), None)
            .await
            .unwrap();
        assert_eq!(confirmed.status, RequestStatus::FeasibilityConfirmed);
    }

    #[tokio::test]
    async fn costing_completion_validates_price_and_records_the_summary() {
        let engine = engine();
        let model = seed_in_status(&engine, RequestStatus::InCosting).await;
        let id = model.id.as_str().to_string();

        // No price at all.
        let result = engine
            .apply_transition(&id, RequestStatus::CostingComplete, &costing(), None)
            .await;
        assert!(matches!(result, Err(WorkflowError::ValidationError(_))));

        // Zero and negative prices.
        for bad_price in [0.0, -10.0, f64::NAN] {
            engine
                .update_request_fields(
                    &id,
                    RequestPatch {
                        selling_price: Some(bad_price),
                        calculated_margin: Some(12.5),
                        ..RequestPatch::default()
                    },
                )
                .await
                .unwrap();
            let result = engine
                .apply_transition(&id, RequestStatus::CostingComplete, &costing(), None)
                .await;
            assert!(
                matches!(result, Err(WorkflowError::ValidationError(_))),
                "price {bad_price} must be rejected"
            );
        }

        engine
            .update_request_fields(
                &id,
                RequestPatch {
                    selling_price: Some(1499.5),
                    calculated_margin: Some(-3.4),
                    ..RequestPatch::default()
                },
            )
            .await
            .unwrap();

        let complete = engine
            .apply_transition(&id, RequestStatus::CostingComplete, &costing(), None)
            .await
            .unwrap();
        assert_eq!(
            complete.history.last().unwrap().comment.as_deref(),
            Some("Selling Price: €1499.50, Margin: -3.4%")
        );
    }

    #[tokio::test]
    async fn field_update_never_touches_status_or_history() {
        let engine = engine();
        let model = seed_in_status(&engine, RequestStatus::InCosting).await;
        let id = model.id.as_str().to_string();
        let before = engine.get_request(&id).await.unwrap();

        let updated = engine
            .update_request_fields(
                &id,
                RequestPatch {
                    costing_notes: Some("check tariff".into()),
                    ..RequestPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, before.status);
        assert_eq!(updated.history, before.history);
        assert_eq!(updated.costing_notes.as_deref(), Some("check tariff"));
        assert_eq!(updated.version, before.version + 1);
        assert!(updated.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn field_update_cannot_empty_the_products_list() {
        let engine = engine();
        let created = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        let id = created.id.as_str().to_string();

        let result = engine
            .update_request_fields(
                &id,
                RequestPatch {
                    products: Some(Vec::new()),
                    ..RequestPatch::default()
                },
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::ValidationError(_))));

        let stored = engine.get_request(&id).await.unwrap();
        assert_eq!(stored.products.len(), 1);
        assert_eq!(stored.version, created.version);
    }

    #[tokio::test]
    async fn list_orders_by_most_recently_updated() {
        let engine = engine();
        let first = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        let second = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();

        // Touch the first request so it becomes the most recent.
        engine
            .update_request_fields(
                first.id.as_str(),
                RequestPatch {
                    client_name: Some("Refreshed".into()),
                    ..RequestPatch::default()
                },
            )
            .await
            .unwrap();

        let listed = engine.list_requests().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn unknown_ids_surface_not_found() {
        let engine = engine();
        assert!(matches!(
            engine.get_request("CRA990001").await,
            Err(WorkflowError::NotFound(_))
        ));
        assert!(matches!(
            engine.delete_request("CRA990001").await,
            Err(WorkflowError::NotFound(_))
        ));
        assert!(matches!(
            engine
                .apply_transition("CRA990001", RequestStatus::Submitted, &sales(), None)
                .await,
            Err(WorkflowError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let engine = engine();
        let model = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        let id = model.id.as_str().to_string();

        engine.delete_request(&id).await.unwrap();
        assert!(matches!(
            engine.get_request(&id).await,
            Err(WorkflowError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn sequence_widens_past_four_digits_instead_of_failing() {
        let engine = engine();
        let year = (Utc::now().year() % 100) as u32;
        for _ in 0..9999 {
            engine
                .store
                .next_sequence(&counter_name(year))
                .await
                .unwrap();
        }

        let model = engine
            .create_request(RequestDraft::default(), &sales())
            .await
            .unwrap();
        assert_eq!(model.id.as_str(), format!("CRA{year:02}10000"));
    }

    #[test]
    fn request_id_formatting_pads_to_four_digits() {
        assert_eq!(format_request_id(25, 1).unwrap().as_str(), "CRA250001");
        assert_eq!(format_request_id(25, 42).unwrap().as_str(), "CRA250042");
        assert_eq!(format_request_id(9, 9999).unwrap().as_str(), "CRA099999");
        assert_eq!(format_request_id(25, 10001).unwrap().as_str(), "CRA2510001");
        assert_eq!(counter_name(7), "request_07");
    }

    #[test]
    fn request_id_wider_than_its_capacity_is_an_error_not_a_truncation() {
        let result = format_request_id(25, i64::MAX);
        assert!(matches!(result, Err(WorkflowError::StorageError(_))));
    }
}
