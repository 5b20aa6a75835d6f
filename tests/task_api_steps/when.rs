//! When steps for task API scenarios.

use super::world::TaskApiWorld;
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#""{method}" "{path}" is requested without a user id"#)]
fn request_without_identity(
    world: &mut TaskApiWorld,
    method: String,
    path: String,
) -> Result<(), eyre::Report> {
    world.request(&method, &path, None, None)?;
    Ok(())
}

#[when(r#"user "{user_id}" creates a task titled "{title}" ending "{end_date}""#)]
fn user_creates_task(
    world: &mut TaskApiWorld,
    user_id: String,
    title: String,
    end_date: String,
) -> Result<(), eyre::Report> {
    world.request(
        "POST",
        "/api/v1/todo",
        Some(&user_id),
        Some(json!({ "title": title, "end_date": end_date })),
    )?;
    Ok(())
}

#[when(r#"user "{user_id}" requests that task"#)]
fn user_requests_that_task(world: &mut TaskApiWorld, user_id: String) -> Result<(), eyre::Report> {
    let id = world
        .last_task_id
        .clone()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;
    world.request("GET", &format!("/api/v1/todo/{id}"), Some(&user_id), None)?;
    Ok(())
}

#[when(r#"user "{user_id}" deletes task "{task_id}""#)]
fn user_deletes_task(
    world: &mut TaskApiWorld,
    user_id: String,
    task_id: String,
) -> Result<(), eyre::Report> {
    world.request(
        "DELETE",
        &format!("/api/v1/todo/{task_id}"),
        Some(&user_id),
        None,
    )?;
    Ok(())
}
