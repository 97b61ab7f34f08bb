use chrono::Utc;
use rocket::{request::FromParam, serde::json::Json, Route, State};

use crate::error::{Error, Result};
use crate::model::{
    api::{Caller, CandidateSpec, ElectionSpec, OrganizerSpec, Receipt},
    common::Address,
    record::Organizer,
};
use crate::store::RecordStore;

pub fn routes() -> Vec<Route> {
    routes![
        register_organizer,
        organize_election,
        add_candidate,
        get_organizer,
        elections_organized_by,
    ]
}

#[post("/organizers", data = "<spec>", format = "json")]
async fn register_organizer(
    caller: std::result::Result<Caller, Error>,
    spec: Json<OrganizerSpec>,
    store: &State<RecordStore>,
) -> Result<Json<Receipt>> {
    let caller = caller?;
    let receipt = store
        .register_organizer(caller.address(), spec.0, Utc::now())
        .await?;
    Ok(Json(receipt))
}

#[post("/elections", data = "<spec>", format = "json")]
async fn organize_election(
    caller: std::result::Result<Caller, Error>,
    spec: Json<ElectionSpec>,
    store: &State<RecordStore>,
) -> Result<Json<Receipt>> {
    let caller = caller?;
    let receipt = store
        .organize_election(caller.address(), spec.0, Utc::now())
        .await?;
    Ok(Json(receipt))
}

#[post("/elections/<name>/candidates", data = "<spec>", format = "json")]
async fn add_candidate(
    caller: std::result::Result<Caller, Error>,
    name: &str,
    spec: Json<CandidateSpec>,
    store: &State<RecordStore>,
) -> Result<Json<Receipt>> {
    let caller = caller?;
    let receipt = store
        .add_candidate(caller.address(), name, spec.0, Utc::now())
        .await?;
    Ok(Json(receipt))
}

#[get("/organizers/<address>")]
async fn get_organizer(
    address: &str,
    store: &State<RecordStore>,
) -> Result<Json<Organizer>> {
    let address = Address::from_param(address)?;
    let organizer = store.organizer(&address).await?;
    Ok(Json(organizer))
}

#[get("/organizers/<address>/elections")]
async fn elections_organized_by(
    address: &str,
    store: &State<RecordStore>,
) -> Result<Json<Vec<String>>> {
    let address = Address::from_param(address)?;
    let names = store.elections_organized_by(&address).await;
    Ok(Json(names))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Header, Status},
        local::asynchronous::{Client, LocalResponse},
        serde::json::{json, serde_json},
    };

    use crate::error::{ErrorBody, ErrorCode};
    use crate::model::api::{Operation, CALLER_HEADER};

    use super::*;

    async fn error_code(response: LocalResponse<'_>) -> Option<ErrorCode> {
        let raw_response = response.into_string().await.unwrap();
        serde_json::from_str::<ErrorBody>(&raw_response).unwrap().code
    }

    #[backend_test]
    async fn register_requires_caller(client: Client) {
        let response = client
            .post(uri!(register_organizer))
            .header(ContentType::JSON)
            .body(json!(OrganizerSpec::example()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());
        assert_eq!(error_code(response).await, Some(ErrorCode::UserRejected));

        // A blank header is as good as none.
        let response = client
            .post(uri!(register_organizer))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, "  "))
            .body(json!(OrganizerSpec::example()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());

        let response = client
            .get(uri!(get_organizer(Address::organizer().to_string())))
            .dispatch()
            .await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[backend_test(organizer)]
    async fn register_and_fetch_organizer(client: Client) {
        let response = client
            .get(uri!(get_organizer(Address::organizer().to_string())))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let raw_response = response.into_string().await.unwrap();
        let organizer = serde_json::from_str::<Organizer>(&raw_response).unwrap();
        assert_eq!(organizer, Organizer::from(OrganizerSpec::example()));
    }

    #[backend_test(organizer)]
    async fn organize_election_and_add_candidates(client: Client) {
        let response = client
            .post(uri!(organize_election))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, Address::organizer().to_string()))
            .body(json!(ElectionSpec::example()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        let raw_response = response.into_string().await.unwrap();
        let receipt = serde_json::from_str::<Receipt>(&raw_response).unwrap();
        assert_eq!(receipt.operation, Operation::OrganizeElection);
        assert_eq!(receipt.subject, "E1");

        let specs = [
            CandidateSpec::example1(),
            CandidateSpec::example2(),
            CandidateSpec::example3(),
        ];
        let mut statuses = Vec::new();
        for spec in specs {
            let response = client
                .post(uri!(add_candidate("E1")))
                .header(ContentType::JSON)
                .header(Header::new(CALLER_HEADER, Address::organizer().to_string()))
                .body(json!(spec).to_string())
                .dispatch()
                .await;
            statuses.push(response.status());
            if response.status() == Status::UnprocessableEntity {
                assert_eq!(error_code(response).await, Some(ErrorCode::CandidateOverflow));
            }
        }
        assert_eq!(
            statuses,
            vec![Status::Ok, Status::Ok, Status::UnprocessableEntity]
        );

        let response = client
            .get(uri!(elections_organized_by(Address::organizer().to_string())))
            .dispatch()
            .await;
        let raw_response = response.into_string().await.unwrap();
        let names = serde_json::from_str::<Vec<String>>(&raw_response).unwrap();
        assert_eq!(names, vec!["E1"]);
    }

    #[backend_test(organizer)]
    async fn organize_election_errors(client: Client) {
        let cases = [
            (Address::voter(1), ElectionSpec::example(), Status::Forbidden, ErrorCode::InvalidOrganizer),
            (
                Address::organizer(),
                ElectionSpec { pass_phrase: String::new(), ..ElectionSpec::example() },
                Status::BadRequest,
                ErrorCode::EmptyPassPhrase,
            ),
            (
                Address::organizer(),
                ElectionSpec { duration_minutes: 9, ..ElectionSpec::example() },
                Status::BadRequest,
                ErrorCode::InsufficientDuration,
            ),
            (
                Address::organizer(),
                ElectionSpec { total_candidate: 1, ..ElectionSpec::example() },
                Status::BadRequest,
                ErrorCode::InsufficientCandidateCount,
            ),
        ];
        for (caller, spec, status, code) in cases {
            let response = client
                .post(uri!(organize_election))
                .header(ContentType::JSON)
                .header(Header::new(CALLER_HEADER, caller.to_string()))
                .body(json!(spec).to_string())
                .dispatch()
                .await;
            assert_eq!(status, response.status());
            assert_eq!(error_code(response).await, Some(code));
        }

        // The first one goes through, the second is a duplicate.
        let mut statuses = Vec::new();
        for _ in 0..2 {
            let response = client
                .post(uri!(organize_election))
                .header(ContentType::JSON)
                .header(Header::new(CALLER_HEADER, Address::organizer().to_string()))
                .body(json!(ElectionSpec::example()).to_string())
                .dispatch()
                .await;
            statuses.push(response.status());
            if response.status() == Status::Conflict {
                assert_eq!(error_code(response).await, Some(ErrorCode::DuplicateName));
            }
        }
        assert_eq!(statuses, vec![Status::Ok, Status::Conflict]);
    }

    #[backend_test(organizer)]
    async fn only_the_organizer_adds_candidates(client: Client) {
        let response = client
            .post(uri!(add_candidate("E1")))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, Address::organizer().to_string()))
            .body(json!(CandidateSpec::example1()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Forbidden, response.status());
        assert_eq!(error_code(response).await, Some(ErrorCode::InvalidOrganizer));

        client
            .post(uri!(organize_election))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, Address::organizer().to_string()))
            .body(json!(ElectionSpec::example()).to_string())
            .dispatch()
            .await;

        let response = client
            .post(uri!(add_candidate("E1")))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, Address::voter(1).to_string()))
            .body(json!(CandidateSpec::example1()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Forbidden, response.status());
        assert_eq!(error_code(response).await, Some(ErrorCode::InvalidOrganizer));
    }

    #[backend_test]
    async fn body_addresses_are_trimmed(client: Client) {
        // Registered with stray whitespace, organizing with a clean header.
        let response = client
            .post(uri!(register_organizer))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, "0xORG"))
            .body(json!({"address": "0xORG ", "voters": [" 0xV1", "0xV1"]}).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let response = client
            .post(uri!(organize_election))
            .header(ContentType::JSON)
            .header(Header::new(CALLER_HEADER, "0xORG"))
            .body(json!(ElectionSpec::example()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let response = client.get(uri!(get_organizer("0xORG"))).dispatch().await;
        let raw_response = response.into_string().await.unwrap();
        let organizer = serde_json::from_str::<Organizer>(&raw_response).unwrap();
        assert_eq!(organizer.voters, vec![Address::parse("0xV1").unwrap()]);
    }

    #[backend_test]
    async fn blank_body_addresses_are_rejected(client: Client) {
        for body in [json!({"address": ""}), json!({"address": "0xORG", "voters": ["  "]})] {
            let response = client
                .post(uri!(register_organizer))
                .header(ContentType::JSON)
                .header(Header::new(CALLER_HEADER, "0xORG"))
                .body(body.to_string())
                .dispatch()
                .await;
            assert_eq!(Status::UnprocessableEntity, response.status());
        }

        let response = client.get(uri!(get_organizer("0xORG"))).dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }
}
