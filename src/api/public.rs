use chrono::Utc;
use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::{
    api::{ActiveAndPast, ElectionDetails},
    common::Address,
    record::Candidate,
};
use crate::store::RecordStore;

pub fn routes() -> Vec<Route> {
    routes![
        active_and_past_elections,
        election_names,
        election_summaries,
        election,
        candidates,
        candidate_count,
        time_left,
        voters,
    ]
}

#[get("/elections")]
async fn active_and_past_elections(store: &State<RecordStore>) -> Json<ActiveAndPast<String>> {
    Json(store.active_and_past_election_names(Utc::now()).await)
}

#[get("/election-names")]
async fn election_names(store: &State<RecordStore>) -> Json<Vec<String>> {
    Json(store.all_election_names().await)
}

#[get("/election-summaries")]
async fn election_summaries(store: &State<RecordStore>) -> Json<ActiveAndPast<ElectionDetails>> {
    Json(store.election_summaries(Utc::now()).await)
}

#[get("/elections/<name>")]
async fn election(name: &str, store: &State<RecordStore>) -> Result<Json<ElectionDetails>> {
    let details = store.election_details(name, Utc::now()).await?;
    Ok(Json(details))
}

#[get("/elections/<name>/candidates")]
async fn candidates(name: &str, store: &State<RecordStore>) -> Result<Json<Vec<Candidate>>> {
    let list = store.candidates_of(name).await?;
    Ok(Json(list))
}

#[get("/elections/<name>/candidates/count")]
async fn candidate_count(name: &str, store: &State<RecordStore>) -> Result<Json<usize>> {
    let count = store.added_candidates(name).await?;
    Ok(Json(count))
}

#[get("/elections/<name>/time-left")]
async fn time_left(name: &str, store: &State<RecordStore>) -> Result<Json<u64>> {
    let seconds = store.time_left(name, Utc::now()).await?;
    Ok(Json(seconds))
}

#[get("/elections/<name>/voters")]
async fn voters(name: &str, store: &State<RecordStore>) -> Result<Json<Vec<Address>>> {
    let addresses = store.voters_of(name).await?;
    Ok(Json(addresses))
}
