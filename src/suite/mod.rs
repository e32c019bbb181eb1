//! The Foody API suite
//!
//! Seven ordered steps: the create/edit/list/delete happy path, then three
//! negative cases. [`steps_for`] optionally swaps in the list round-trip check
//! and the invalid-create variants, and adds the repeated-delete check.

use crate::client::FoodyClient;
use crate::config::ChecksConfig;
use crate::error::{StepError, StepResult};
use crate::harness::assert::{ensure, expect_message, expect_status};
use crate::harness::{FixtureState, Step};
use crate::models::{FoodPayload, PatchOperation};
use futures::future::BoxFuture;
use reqwest::StatusCode;

pub const NEW_FOOD_NAME: &str = "New Food";
pub const NEW_FOOD_DESCRIPTION: &str = "Test food description";
pub const UPDATED_FOOD_NAME: &str = "Updated Food Name";
pub const NON_EXISTING_NAME: &str = "Non Existing";
pub const INVALID_FOOD_URL: &str = "http://example.com/food.png";

pub const NONEXISTENT_EDIT_ID: &str = "invalidFoodId";
pub const NONEXISTENT_DELETE_ID: &str = "this-id-does-not-exist";

pub const MSG_EDITED: &str = "Successfully edited";
pub const MSG_DELETED: &str = "Deleted successfully!";
pub const MSG_NOT_FOUND: &str = "No food revues...";
pub const MSG_UNABLE_TO_DELETE: &str = "Unable to delete this food revue!";

/// Response field carrying the created id
pub const FOOD_ID_FIELD: &str = "foodId";

/// Listing field carrying a food's name
pub const FOOD_NAME_FIELD: &str = "name";

/// The seven standard steps
pub fn standard_steps() -> Vec<Step> {
    vec![
        Step::new(1, "create_food", create_food),
        Step::new(2, "edit_food", edit_food),
        Step::new(3, "list_foods", list_foods),
        Step::new(4, "delete_food", delete_food),
        Step::new(5, "create_food_missing_fields", create_invalid_food),
        Step::new(6, "edit_nonexistent_food", edit_nonexistent_food),
        Step::new(7, "delete_nonexistent_food", delete_nonexistent_food),
    ]
}

/// Standard steps plus whichever optional checks are enabled
pub fn steps_for(checks: &ChecksConfig) -> Vec<Step> {
    let mut steps = standard_steps();
    if checks.verify_edit_in_list {
        if let Some(list) = steps.iter_mut().find(|s| s.order == 3) {
            *list = Step::new(3, "list_foods_contains_edit", list_foods_with_edit);
        }
    }
    if checks.verify_invalid_create_variants {
        if let Some(create) = steps.iter_mut().find(|s| s.order == 5) {
            *create = Step::new(
                5,
                "create_food_missing_fields_variants",
                create_invalid_food_variants,
            );
        }
    }
    if checks.verify_delete_idempotence {
        steps.push(Step::new(8, "delete_food_again", delete_food_again));
    }
    steps
}

fn create_food<'a>(
    client: &'a FoodyClient,
    fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let payload = FoodPayload::new(NEW_FOOD_NAME, NEW_FOOD_DESCRIPTION).with_url("");
        let response = client.create_food(&payload).await?;
        expect_status(&response, StatusCode::CREATED)?;

        let json: serde_json::Value = response.json()?;
        let id = json
            .get(FOOD_ID_FIELD)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        fixture.created_food_id = Some(id.clone());
        tracing::info!(food_id = %id, "Captured created food id");

        ensure(!id.is_empty(), "Food ID should not be null or empty")
    })
}

fn edit_food<'a>(
    client: &'a FoodyClient,
    fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let changes = [PatchOperation::replace("/name", UPDATED_FOOD_NAME)];
        let response = client.edit_food(fixture.food_id(), &changes).await?;
        expect_status(&response, StatusCode::OK)?;
        expect_message(&response, MSG_EDITED)?;
        fixture.edited_name = Some(UPDATED_FOOD_NAME.to_string());
        Ok(())
    })
}

fn list_foods<'a>(
    client: &'a FoodyClient,
    _fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = client.list_foods().await?;
        expect_status(&response, StatusCode::OK)?;
        let foods: Vec<serde_json::Value> = response.json()?;
        tracing::debug!(count = foods.len(), "Listed foods");
        Ok(())
    })
}

fn list_foods_with_edit<'a>(
    client: &'a FoodyClient,
    fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = client.list_foods().await?;
        expect_status(&response, StatusCode::OK)?;
        let foods: Vec<serde_json::Value> = response.json()?;

        let id = fixture.food_id();
        let expected = fixture.edited_name.as_deref().unwrap_or(UPDATED_FOOD_NAME);
        let Some(created) = foods
            .iter()
            .find(|food| field_str(food, FOOD_ID_FIELD) == Some(id))
        else {
            return Err(StepError::Assertion(format!(
                "created food {:?} is not in the listing",
                id
            )));
        };

        let actual = field_str(created, FOOD_NAME_FIELD);
        ensure(
            actual == Some(expected),
            format!(
                "created food {:?} is named {:?}, expected {:?}",
                id, actual, expected
            ),
        )
    })
}

fn delete_food<'a>(
    client: &'a FoodyClient,
    fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = client.delete_food(fixture.food_id()).await?;
        expect_status(&response, StatusCode::OK)?;
        expect_message(&response, MSG_DELETED)
    })
}

fn create_invalid_food<'a>(
    client: &'a FoodyClient,
    _fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = client.create_food(&FoodPayload::new("", "")).await?;
        expect_status(&response, StatusCode::BAD_REQUEST)
    })
}

/// Empty required fields are rejected whatever optional fields accompany them
fn create_invalid_food_variants<'a>(
    client: &'a FoodyClient,
    _fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let payloads = [
            FoodPayload::new("", ""),
            FoodPayload::new("", "").with_url(INVALID_FOOD_URL),
            FoodPayload::new("", NEW_FOOD_DESCRIPTION),
        ];
        for payload in &payloads {
            let response = client.create_food(payload).await?;
            expect_status(&response, StatusCode::BAD_REQUEST).map_err(|err| {
                StepError::Assertion(format!("payload {:?}: {}", payload, err))
            })?;
        }
        Ok(())
    })
}

fn edit_nonexistent_food<'a>(
    client: &'a FoodyClient,
    _fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let changes = [PatchOperation::replace("/name", NON_EXISTING_NAME)];
        let response = client.edit_food(NONEXISTENT_EDIT_ID, &changes).await?;
        expect_status(&response, StatusCode::NOT_FOUND)?;
        expect_message(&response, MSG_NOT_FOUND)
    })
}

fn delete_nonexistent_food<'a>(
    client: &'a FoodyClient,
    _fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = client.delete_food(NONEXISTENT_DELETE_ID).await?;
        expect_status(&response, StatusCode::BAD_REQUEST)?;
        expect_message(&response, MSG_UNABLE_TO_DELETE)
    })
}

fn delete_food_again<'a>(
    client: &'a FoodyClient,
    fixture: &'a mut FixtureState,
) -> BoxFuture<'a, StepResult> {
    Box::pin(async move {
        let response = client.delete_food(fixture.food_id()).await?;
        expect_status(&response, StatusCode::BAD_REQUEST)?;
        expect_message(&response, MSG_UNABLE_TO_DELETE)
    })
}

/// String field of a listed food, whichever casing it is serialized with
fn field_str<'v>(food: &'v serde_json::Value, key: &str) -> Option<&'v str> {
    food.as_object()?
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.as_str())
}
