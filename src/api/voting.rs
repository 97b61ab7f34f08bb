use chrono::Utc;
use rocket::{serde::json::Json, Route, State};

use crate::error::{Error, Result};
use crate::model::api::{Caller, Receipt, VoteSpec};
use crate::store::RecordStore;

pub fn routes() -> Vec<Route> {
    routes![cast_vote]
}

#[post("/elections/<name>/votes", data = "<vote>", format = "json")]
async fn cast_vote(
    voter: std::result::Result<Caller, Error>,
    name: &str,
    vote: Json<VoteSpec>,
    store: &State<RecordStore>,
) -> Result<Json<Receipt>> {
    let voter = voter?;
    let receipt = store
        .cast_vote(voter.address(), name, vote.0, Utc::now())
        .await?;
    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Header, Status},
        local::asynchronous::Client,
        serde::json::{json, serde_json},
    };

    use crate::error::{ErrorBody, ErrorCode};
    use crate::model::{
        api::{CandidateSpec, ElectionDetails, ElectionSpec, Operation, CALLER_HEADER},
        common::Address,
    };

    use super::*;

    /// Organize "E1" and fill both its slots.
    async fn setup_election(client: &Client) {
        let organizer = Header::new(CALLER_HEADER, Address::organizer().to_string());
        client
            .post("/elections")
            .header(ContentType::JSON)
            .header(organizer.clone())
            .body(json!(ElectionSpec::example()).to_string())
            .dispatch()
            .await;
        for spec in [CandidateSpec::example1(), CandidateSpec::example2()] {
            client
                .post("/elections/E1/candidates")
                .header(ContentType::JSON)
                .header(organizer.clone())
                .body(json!(spec).to_string())
                .dispatch()
                .await;
        }
    }

    async fn vote(client: &Client, voter: &Address, spec: VoteSpec) -> (Status, String) {
        let response = client
            .post(uri!(cast_vote("E1")))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, voter.to_string()))
            .body(json!(spec).to_string())
            .dispatch()
            .await;
        (response.status(), response.into_string().await.unwrap())
    }

    fn code_of(raw_response: &str) -> Option<ErrorCode> {
        serde_json::from_str::<ErrorBody>(raw_response).unwrap().code
    }

    #[backend_test(organizer)]
    async fn vote_once(client: Client) {
        setup_election(&client).await;
        let voter = Address::voter(0xa);

        let (status, raw_response) = vote(&client, &voter, VoteSpec::new("p", 0)).await;
        assert_eq!(Status::Ok, status);
        let receipt = serde_json::from_str::<Receipt>(&raw_response).unwrap();
        assert_eq!(receipt.operation, Operation::CastVote);
        assert_eq!(receipt.candidate_index, Some(0));

        // A retry, and a change of heart, both fail.
        for index in [0, 1] {
            let (status, raw_response) = vote(&client, &voter, VoteSpec::new("p", index)).await;
            assert_eq!(Status::Conflict, status);
            assert_eq!(code_of(&raw_response), Some(ErrorCode::AlreadyVoted));
        }

        let response = client.get("/elections/E1").dispatch().await;
        let raw_response = response.into_string().await.unwrap();
        let details = serde_json::from_str::<ElectionDetails>(&raw_response).unwrap();
        assert_eq!(details.total_vote, 1);
        assert_eq!(details.candidates[0].vote_count, 1);
        assert_eq!(details.candidates[1].vote_count, 0);
    }

    #[backend_test(organizer)]
    async fn vote_errors(client: Client) {
        let voter = Address::voter(0xb);

        // Nothing organized yet.
        let (status, raw_response) = vote(&client, &voter, VoteSpec::new("p", 0)).await;
        assert_eq!(Status::UnprocessableEntity, status);
        assert_eq!(code_of(&raw_response), Some(ErrorCode::ZeroCandidate));

        setup_election(&client).await;

        let (status, raw_response) = vote(&client, &voter, VoteSpec::new("wrong", 0)).await;
        assert_eq!(Status::UnprocessableEntity, status);
        assert_eq!(code_of(&raw_response), Some(ErrorCode::InvalidPassPhrase));

        let (status, raw_response) = vote(&client, &voter, VoteSpec::new("p", 2)).await;
        assert_eq!(Status::UnprocessableEntity, status);
        assert_eq!(code_of(&raw_response), Some(ErrorCode::CandidateIndexOutOfBound));

        let (status, raw_response) = vote(&client, &voter, VoteSpec::new("p", -1)).await;
        assert_eq!(Status::UnprocessableEntity, status);
        assert_eq!(code_of(&raw_response), Some(ErrorCode::CandidateIndexOutOfBound));

        // None of that counted.
        let response = client.get("/elections/E1/voters").dispatch().await;
        let raw_response = response.into_string().await.unwrap();
        let voters = serde_json::from_str::<Vec<Address>>(&raw_response).unwrap();
        assert!(voters.is_empty());
    }

    #[backend_test(organizer)]
    async fn vote_requires_caller(client: Client) {
        setup_election(&client).await;
        let response = client
            .post(uri!(cast_vote("E1")))
            .header(ContentType::JSON)
            .body(json!(VoteSpec::new("p", 0)).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());
        let raw_response = response.into_string().await.unwrap();
        assert_eq!(code_of(&raw_response), Some(ErrorCode::UserRejected));
    }
}
