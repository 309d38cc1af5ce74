use std::collections::BTreeMap;

use credsign_core::{ClientCredentials, Credentials, ErrorKind, Identity};
use credsign_oauth1::constants::{
    OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP,
    OAUTH_TOKEN, OAUTH_VERSION,
};
use credsign_oauth1::{Config, SignatureMethod, SigningRequest};
use http::Method;
use log::debug;
use pretty_assertions::assert_eq;

const PRIVATE_KEY_PEM: &str = include_str!("../testdata/rsa_private_pkcs8.pem");
const ENCRYPTED_PRIVATE_KEY_PEM: &str = include_str!("../testdata/rsa_private_encrypted.pem");

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn protocol_params(
    client: &ClientCredentials,
    token: Option<&Credentials>,
    method: SignatureMethod,
) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert(OAUTH_CONSUMER_KEY.to_string(), client.id().to_string());
    params.insert(OAUTH_SIGNATURE_METHOD.to_string(), method.as_str().to_string());
    params.insert(OAUTH_TIMESTAMP.to_string(), "137131201".to_string());
    params.insert(OAUTH_NONCE.to_string(), "7d8f3e4a".to_string());
    params.insert(OAUTH_VERSION.to_string(), "1.0".to_string());
    if let Some(token) = token {
        params.insert(OAUTH_TOKEN.to_string(), token.id().to_string());
    }
    params
}

fn configs() -> Vec<Config> {
    vec![
        Config::default()
            .with_signature_method(SignatureMethod::Plaintext)
            .with_consumer("9djdj82h48djs9d2", "j49sk3j29djd")
            .with_token("kkk9d7dh3k39sjv7", "dh893hdasih9"),
        Config::default()
            .with_consumer("9djdj82h48djs9d2", "j49sk3j29djd")
            .with_token("kkk9d7dh3k39sjv7", "dh893hdasih9"),
        Config::default()
            .with_signature_method(SignatureMethod::RsaSha1)
            .with_consumer("9djdj82h48djs9d2", "")
            .with_private_key(PRIVATE_KEY_PEM, None),
        Config::default()
            .with_signature_method(SignatureMethod::RsaSha1)
            .with_consumer("9djdj82h48djs9d2", "")
            .with_private_key(ENCRYPTED_PRIVATE_KEY_PEM, Some("correct-horse".to_string())),
    ]
}

#[test]
fn test_sign_and_verify_form_request() {
    init();

    let req = SigningRequest::new(
        Method::POST,
        "https://Example.com:443/request?b5=%3D%253D&a3=a&c%40=&a2=r%20b",
    )
    .unwrap()
    .with_form_body(b"c2&a3=2+q");

    for cfg in configs() {
        let signer = cfg.signer();
        let client = cfg.client_credentials().unwrap();
        let token = cfg.token_credentials();
        let params = protocol_params(&client, token.as_ref(), signer.signature_method());

        let signature = signer.sign(&req, &params, &client, token.as_ref()).unwrap();
        debug!("{} signature: {signature}", signer.signature_method());

        assert!(signer
            .verify(&signature, &req, &params, &client, token.as_ref())
            .unwrap());
    }
}

#[test]
fn test_encrypted_and_plain_keys_agree() {
    let req = SigningRequest::new(Method::GET, "http://example.com/resource").unwrap();
    let cfgs = configs();
    let (plain, encrypted) = (&cfgs[2], &cfgs[3]);

    let plain_client = plain.client_credentials().unwrap();
    let encrypted_client = encrypted.client_credentials().unwrap();
    let params = protocol_params(&plain_client, None, SignatureMethod::RsaSha1);

    let plain_signature = plain
        .signer()
        .sign(&req, &params, &plain_client, None)
        .unwrap();
    let encrypted_signature = encrypted
        .signer()
        .sign(&req, &params, &encrypted_client, None)
        .unwrap();
    assert_eq!(plain_signature, encrypted_signature);

    // Same consumer key, different secret shape.
    assert!(!plain_client.matches(&encrypted_client));
}

#[test]
fn test_signature_in_query_is_ignored() {
    let cfg = configs().remove(1);
    let signer = cfg.signer();
    let client = cfg.client_credentials().unwrap();
    let token = cfg.token_credentials();

    let mut req =
        SigningRequest::new(Method::GET, "http://example.com/photos?size=original").unwrap();
    let params = protocol_params(&client, token.as_ref(), signer.signature_method());
    let signature = signer.sign(&req, &params, &client, token.as_ref()).unwrap();

    // A provider sees the signature among the query parameters.
    req.param_push(OAUTH_SIGNATURE, signature.clone());
    assert!(signer
        .verify(&signature, &req, &params, &client, token.as_ref())
        .unwrap());
}

#[test]
fn test_parameter_order_does_not_change_signature() {
    let cfg = configs().remove(1);
    let signer = cfg.signer();
    let client = cfg.client_credentials().unwrap();
    let token = cfg.token_credentials();
    let params = protocol_params(&client, token.as_ref(), signer.signature_method());

    let forward = SigningRequest::new(Method::GET, "http://example.com/?a=1&b=2&a=0").unwrap();
    let backward = SigningRequest::new(Method::GET, "http://example.com/?a=0&b=2&a=1").unwrap();

    assert_eq!(
        signer.sign(&forward, &params, &client, token.as_ref()).unwrap(),
        signer.sign(&backward, &params, &client, token.as_ref()).unwrap()
    );
}

#[test]
fn test_invalid_uri_is_request_invalid() {
    let err = SigningRequest::new(Method::GET, "photos?size=original").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}
