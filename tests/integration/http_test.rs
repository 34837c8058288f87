//! Integration tests for quote sources over real HTTP
//!
//! A throwaway TCP responder on localhost stands in for each provider.

use goldfeed::feed::{
    BinanceSource, CoinGeckoSource, HttpFetcher, QuoteSource, SourceError, YahooSource,
};
use goldfeed::service::{LivePrice, PriceService, ServiceConfig};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve the same canned response to every connection; returns the base URL
async fn serve(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let response = response.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Accept connections but never answer
async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}", addr)
}

fn http(timeout_ms: u64) -> HttpFetcher {
    HttpFetcher::new(Duration::from_millis(timeout_ms)).unwrap()
}

#[tokio::test]
async fn test_coingecko_over_http() {
    let base = serve(
        "200 OK",
        r#"{"pax-gold":{"usd":2350.4,"usd_24h_change":0.25}}"#,
    )
    .await;
    let source = CoinGeckoSource::with_base_url(http(2000), base);

    let quote = source.fetch().await.unwrap();
    assert_eq!(quote.price, 2350.4);
    assert_eq!(quote.change_percent, 0.25);
    assert_eq!(quote.source, CoinGeckoSource::NAME);
}

#[tokio::test]
async fn test_binance_over_http() {
    let base = serve(
        "200 OK",
        r#"{"symbol":"PAXGUSDT","lastPrice":"2350.40","priceChange":"5.10","priceChangePercent":"0.22"}"#,
    )
    .await;
    let source = BinanceSource::with_base_url(http(2000), base, "Binance test");

    let quote = source.fetch().await.unwrap();
    assert_eq!(quote.price, 2350.40);
    assert_eq!(quote.change, 5.10);
    assert_eq!(quote.source, "Binance test");
}

#[tokio::test]
async fn test_yahoo_over_http_without_proxy() {
    let base = serve(
        "200 OK",
        r#"{"chart":{"result":[{"meta":{"regularMarketPrice":2361.5,"chartPreviousClose":2350.0}}],"error":null}}"#,
    )
    .await;
    let source = YahooSource::with_base_url(http(2000), base, "");

    let quote = source.fetch().await.unwrap();
    assert_eq!(quote.price, 2361.5);
    assert_eq!(quote.change, 11.5);
}

#[tokio::test]
async fn test_error_status_is_no_data() {
    let base = serve("503 Service Unavailable", r#"{"error":"busy"}"#).await;
    let source = BinanceSource::with_base_url(http(2000), base, "b");

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Status(s) if s.as_u16() == 503));
}

#[tokio::test]
async fn test_non_json_body_is_no_data() {
    let base = serve("200 OK", "<html>rate limited</html>").await;
    let source = CoinGeckoSource::with_base_url(http(2000), base);

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidPayload(_)));
}

#[tokio::test]
async fn test_empty_body_is_no_data() {
    let base = serve("200 OK", "").await;
    let source = CoinGeckoSource::with_base_url(http(2000), base);

    assert!(source.fetch().await.is_err());
}

#[tokio::test]
async fn test_unexpected_shape_is_no_data() {
    let base = serve("200 OK", r#"{"price":"not-a-number"}"#).await;
    let source = BinanceSource::with_base_url(http(2000), base, "b");

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::MissingField("lastPrice")));
}

#[tokio::test]
async fn test_silent_upstream_times_out() {
    let base = serve_silence().await;
    let source = CoinGeckoSource::with_base_url(http(200), base);

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Timeout(_)), "{err}");
}

#[tokio::test]
async fn test_connection_refused_is_no_data() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = CoinGeckoSource::with_base_url(http(2000), format!("http://{}", addr));
    assert!(matches!(
        source.fetch().await,
        Err(SourceError::Http(_))
    ));
}

#[tokio::test]
async fn test_service_falls_back_across_real_sources() {
    let down = serve("500 Internal Server Error", "{}").await;
    let garbage = serve("200 OK", r#"{"pax-gold":{"usd":0}}"#).await;
    let silent = serve_silence().await;
    let good = serve(
        "200 OK",
        r#"{"lastPrice":"2350.40","priceChange":"5.10","priceChangePercent":"0.22"}"#,
    )
    .await;

    let fetcher = http(300);
    let sources: Vec<Box<dyn QuoteSource>> = vec![
        Box::new(BinanceSource::with_base_url(fetcher.clone(), down, "down")),
        Box::new(CoinGeckoSource::with_base_url(fetcher.clone(), garbage)),
        Box::new(CoinGeckoSource::with_base_url(fetcher.clone(), silent)),
        Box::new(BinanceSource::with_base_url(fetcher, good, "good")),
    ];
    let config = ServiceConfig {
        timeout: Duration::from_millis(300),
        ..ServiceConfig::default()
    };
    let service = PriceService::new(sources, config);

    let result = service.get_live_price(false).await;
    let LivePrice::Fresh(quote) = result else {
        panic!("expected fresh quote, got {result:?}");
    };
    assert_eq!(quote.source, "good");
    assert_eq!(quote.price, 2350.40);

    // Cached now, served without touching the sockets
    assert!(matches!(
        service.get_live_price(false).await,
        LivePrice::Cached(_)
    ));
}
