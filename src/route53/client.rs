use std::time::Duration;

use serde::de::DeserializeOwned;
use snafu::{ensure, IntoError, ResultExt};

use crate::common::{
    self, key_file_or_string, ConfigSnafu, Page, ProviderSnafu, RecordSet, RecordSetCursor,
    RequestSnafu, ResponseSnafu, Result, Zone, ZoneCursor,
};

use super::models::{
    ChangeResourceRecordSetsRequest, ChangeResourceRecordSetsResponse, ErrorResponse, HostedZone,
    ListHostedZonesByNameResponse, ListHostedZonesResponse, ListResourceRecordSetsResponse,
};
use super::sign::{amz_date, canonical_query, sha256_hex, Request, Signer};

pub const PROVIDER_NAME: &str = "Route53";

const API_VERSION: &str = "2013-04-01";
const SIGNING_REGION: &str = "us-east-1";
const SIGNING_SERVICE: &str = "route53";
const RECORD_SETS_PER_PAGE: &str = "100";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Zone ids come back as `/hostedzone/Z…`; paths want the bare id.
fn bare_zone_id(zone_id: &str) -> &str {
    zone_id.trim_start_matches("/hostedzone/")
}

fn api_error(status: u16, body: &str) -> common::Error {
    let message = match quick_xml::de::from_str::<ErrorResponse>(body) {
        Ok(response) => format!(
            "Request unsuccessful: {status} {} {}",
            response.error.code, response.error.message
        ),
        Err(_) => format!("Request unsuccessful: {status} {}", body.trim()),
    };
    ResponseSnafu { message }.build()
}

pub struct Route53Client {
    agent: ureq::Agent,
    base_url: String,
    host: String,
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl Route53Client {
    fn send(&self, method: &str, path: &str, params: &[(&str, &str)], payload: &[u8]) -> Result<String> {
        let query = canonical_query(params);
        let url = match query.is_empty() {
            true => format!("{}{path}", self.base_url),
            false => format!("{}{path}?{query}", self.base_url),
        };

        let now = chrono::Utc::now();
        let mut headers = vec![
            ("host", self.host.clone()),
            ("x-amz-content-sha256", sha256_hex(payload)),
            ("x-amz-date", amz_date(now)),
        ];
        if let Some(token) = &self.session_token {
            headers.push(("x-amz-security-token", token.clone()));
        }

        let authorization = Signer {
            access_key_id: &self.access_key_id,
            secret_access_key: &self.secret_access_key,
            region: SIGNING_REGION,
            service: SIGNING_SERVICE,
        }
        .authorization(
            &Request {
                method,
                path,
                query: &query,
                headers: &headers,
                payload,
            },
            now,
        );

        tracing::debug!(
            url = url.as_str(),
            method = method,
            provider = PROVIDER_NAME,
            "Sending request"
        );

        // ureq derives the Host header from the URL.
        let mut req = self
            .agent
            .request(method, &url)
            .set("Authorization", &authorization);
        for (name, value) in headers.iter().filter(|(name, _)| *name != "host") {
            req = req.set(name, value);
        }

        let resp = match payload.is_empty() {
            true => req.call(),
            false => req.set("Content-Type", "text/xml").send_bytes(payload),
        };

        match resp {
            Ok(resp) => resp.into_string().boxed_local().context(ProviderSnafu {
                message: "Failed to read response",
            }),
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(api_error(status, &body))
            }
            Err(err) => Err(RequestSnafu {
                url: url.as_str(),
                method,
            }
            .into_error(err)),
        }
    }

    fn api_get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let body = self.send("GET", path, params, &[])?;
        quick_xml::de::from_str(&body)
            .boxed_local()
            .context(ProviderSnafu {
                message: "Failed to deserialize response",
            })
    }

    fn api_post<T: DeserializeOwned>(&self, path: &str, body: impl serde::Serialize) -> Result<T> {
        let payload = quick_xml::se::to_string(&body)
            .boxed_local()
            .context(ProviderSnafu {
                message: "Failed to serialize request",
            })?;
        let payload = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{payload}");

        let body = self.send("POST", path, &[], payload.as_bytes())?;
        quick_xml::de::from_str(&body)
            .boxed_local()
            .context(ProviderSnafu {
                message: "Failed to deserialize response",
            })
    }
}

impl common::Provider for Route53Client {
    fn list_zones(&self, cursor: Option<&ZoneCursor>) -> Result<Page<Zone, ZoneCursor>> {
        let mut params = Vec::new();
        if let Some(cursor) = cursor {
            params.push(("marker", cursor.marker.as_str()));
        }

        let resp: ListHostedZonesResponse =
            self.api_get(&format!("/{API_VERSION}/hostedzone"), &params)?;

        let next = match resp.is_truncated {
            true => {
                ensure!(
                    resp.next_marker.is_some(),
                    ResponseSnafu {
                        message: "Zone listing truncated without a marker",
                    }
                );
                resp.next_marker.map(|marker| ZoneCursor { marker })
            }
            false => None,
        };

        Ok(Page {
            items: resp.hosted_zones.items.into_iter().map(HostedZone::into_zone).collect(),
            next,
        })
    }

    fn find_zones_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        let resp: ListHostedZonesByNameResponse = self.api_get(
            &format!("/{API_VERSION}/hostedzonesbyname"),
            &[("dnsname", name), ("maxitems", "1")],
        )?;
        Ok(resp.hosted_zones.items.into_iter().map(HostedZone::into_zone).collect())
    }

    fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<&RecordSetCursor>,
    ) -> Result<Page<RecordSet, RecordSetCursor>> {
        let mut params = vec![("maxitems", RECORD_SETS_PER_PAGE)];
        if let Some(cursor) = cursor {
            params.push(("name", cursor.name.as_str()));
            params.push(("type", cursor.kind.as_str()));
            if let Some(identifier) = &cursor.identifier {
                params.push(("identifier", identifier.as_str()));
            }
        }

        let resp: ListResourceRecordSetsResponse = self.api_get(
            &format!("/{API_VERSION}/hostedzone/{}/rrset", bare_zone_id(zone_id)),
            &params,
        )?;

        let next = match (resp.is_truncated, resp.next_record_name, resp.next_record_type) {
            (false, _, _) => None,
            (true, Some(name), Some(kind)) => Some(RecordSetCursor {
                name,
                kind,
                identifier: resp.next_record_identifier,
            }),
            (true, _, _) => {
                return ResponseSnafu {
                    message: format!("Record set listing for {zone_id} truncated without a cursor"),
                }
                .fail()
            }
        };

        let items = resp
            .resource_record_sets
            .items
            .into_iter()
            .map(|record| record.into_record_set())
            .collect::<Result<Vec<_>>>()?;

        Ok(Page { items, next })
    }

    fn create_record_set(&self, zone_id: &str, batch: &common::ChangeBatch) -> Result<()> {
        let zone_id = bare_zone_id(zone_id);
        let resp: ChangeResourceRecordSetsResponse = self.api_post(
            &format!("/{API_VERSION}/hostedzone/{zone_id}/rrset/"),
            ChangeResourceRecordSetsRequest::new(batch, zone_id),
        )?;

        tracing::debug!(
            provider = PROVIDER_NAME,
            change_id = resp.change_info.id.as_str(),
            status = resp.change_info.status.as_str(),
            "Change submitted",
        );
        Ok(())
    }
}

impl TryFrom<super::Config> for Route53Client {
    type Error = common::Error;

    fn try_from(value: super::Config) -> Result<Self> {
        let host = match (value.endpoint.host_str(), value.endpoint.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return ConfigSnafu {
                    message: format!("{} has no host", value.endpoint),
                    prefix: "route53.endpoint",
                }
                .fail()
            }
        };

        Ok(Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            base_url: value.endpoint[..url::Position::BeforePath].to_string(),
            host,
            access_key_id: value.access_key_id,
            secret_access_key: key_file_or_string(
                value.secret_access_key,
                "route53.secret_access_key",
            )?,
            session_token: value.session_token,
        })
    }
}
