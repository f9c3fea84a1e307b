use criterion::{criterion_group, criterion_main, Criterion};
use echo_http::codec::{RequestDecoder, ResponseEncoder};
use echo_http::connection::HttpConnection;
use echo_http::handler::make_handler;
use echo_http::protocol::{HandlerError, Request, Response};
use http::StatusCode;
use std::hint::black_box;
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};

async fn echo_handler(request: Request) -> Result<Response, HandlerError> {
    let text = request.route().parameter().ok_or(HandlerError::missing_parameter("text"))?.to_owned();
    Ok(Response::text(StatusCode::OK, text))
}

fn bench_request_decoder(c: &mut Criterion) {
    let request = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";

    c.bench_function("decode_start_line", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = bytes::BytesMut::from(&request[..]);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let response = Response::text(StatusCode::OK, "Hello World!");

    c.bench_function("encode_text_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = bytes::BytesMut::new();
            black_box(encoder.encode(response.clone(), &mut bytes).unwrap());
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let request = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let handler = Arc::new(make_handler(echo_handler));
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();

    c.bench_function("process_echo_request", |b| {
        b.to_async(&runtime).iter(|| {
            // the whole request is readable at once and the response goes nowhere
            let connection = HttpConnection::new(&request[..], tokio::io::sink());
            let handler = Arc::clone(&handler);
            async move { black_box(connection.process(handler).await.unwrap()) }
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
