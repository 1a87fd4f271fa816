//! Static file serving handlers

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::traits::{EntrySource, StaticFileServer, WebSocketManager};
use crate::webserver_impl::WebServer;

/// Page served when the static directory has no index.html
const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Bracket Vote</title>
    <style>
        body { font-family: sans-serif; max-width: 40em; margin: 3em auto; }
        button { font-size: 1.2em; margin: 0.5em; }
        #winner { font-size: 2em; }
    </style>
</head>
<body>
    <h1>Bracket Vote</h1>
    <div id="round"></div>
    <div id="pair"></div>
    <div id="winner"></div>
    <script>
        const ws = new WebSocket(`ws://${location.host}/ws`);
        const send = (action) => ws.send(JSON.stringify(action));
        ws.onmessage = (event) => {
            const msg = JSON.parse(event.data);
            if (msg.type !== 'state') return;
            const { vote, winner } = msg.state;
            document.getElementById('winner').textContent = winner ? `Winner: ${winner}` : '';
            document.getElementById('round').textContent = vote ? `Round ${vote.round}` : '';
            const pair = document.getElementById('pair');
            pair.innerHTML = '';
            (vote ? vote.pair : []).forEach((entry) => {
                const button = document.createElement('button');
                button.textContent = `${entry} (${(vote.tally || {})[entry] || 0})`;
                button.onclick = () => send({ type: 'VOTE', entry });
                pair.appendChild(button);
            });
        };
    </script>
</body>
</html>"#;

/// Serve index.html for root path
pub async fn serve_index<W, S, E>(State(server): State<WebServer<W, S, E>>) -> Html<String>
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    match server.static_server().serve_file("index.html").await {
        Ok(response) => Html(String::from_utf8_lossy(&response.content).into_owned()),
        Err(_) => Html(FALLBACK_INDEX.to_string()),
    }
}

/// Serve static files
pub async fn serve_static<W, S, E>(Path(path): Path<String>, State(server): State<WebServer<W, S, E>>) -> Response
where
    W: WebSocketManager + 'static,
    S: StaticFileServer + 'static,
    E: EntrySource + 'static,
{
    let file_response = match server.static_server().serve_file(&path).await {
        Ok(file_response) => file_response,
        Err(e) => return e.into_response(),
    };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file_response.content_type);

    if let Some(cache_control) = file_response.cache_control {
        response = response.header(header::CACHE_CONTROL, cache_control);
    }

    response
        .body(file_response.content.into())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
