mod common;

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread;

use common::{DocRoot, Response};
use minihttpd::ServerConfig;
use minihttpd::net::server::Server;

fn roundtrip(addr: std::net::SocketAddr, request: &[u8]) -> Response {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(request).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).unwrap();
    Response::parse(&raw)
}

#[test]
fn test_listener_serves_connections_one_after_another() {
    let root = DocRoot::new().with_file("index.html", b"hi");
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = Server::new(ServerConfig::default(), root.path().to_path_buf());
    thread::spawn(move || server.serve(listener));

    let res = roundtrip(addr, b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n");
    assert_eq!(res.status_line, "HTTP/1.1 200 OK");
    assert_eq!(res.body, b"hi");

    let res = roundtrip(addr, b"PUT /index.html HTTP/1.1\r\n\r\n");
    assert_eq!(res.status_line, "HTTP/1.1 405 Method Not Allowed");

    let res = roundtrip(addr, b"nonsense\r\n\r\n");
    assert_eq!(res.status_line, "HTTP/1.0 400 Bad Request");
}
