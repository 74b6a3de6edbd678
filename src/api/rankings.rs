use tracing::{debug, instrument};

use crate::api::{self, ErrorBody};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{RankingsPayload, Student};

#[instrument(skip(client, config, token))]
pub(crate) async fn get_student_rankings(
    client: &reqwest::Client,
    config: &ClientConfig,
    university_id: &str,
    token: &str,
) -> Result<Vec<Student>> {
    let url = config.endpoint(&["student", "rankings", university_id])?;
    let request = client.get(url.clone()).bearer_auth(token);
    let payload: RankingsPayload =
        api::send_json(request, url.as_str(), ErrorBody::JsonMessage).await?;
    debug!(
        count = payload.data.len(),
        university_id, "fetched student rankings"
    );
    Ok(payload.data)
}
