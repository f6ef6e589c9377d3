use serde_json::{Value, json};

pub const TIMESTAMP: u64 = 1458264810957;

pub fn response() -> Value {
    json!({
        "event": "response",
        "timestamp": TIMESTAMP,
        "id": "1458264811279:localhost:16014:ilx17kv4:10001",
        "instance": "http://localhost:61253",
        "method": "post",
        "path": "/data",
        "query": { "name": "adam" },
        "responseTime": 150,
        "statusCode": 200
    })
}

pub fn ops() -> Value {
    json!({
        "event": "ops",
        "timestamp": TIMESTAMP,
        "host": "localhost",
        "pid": 64291,
        "os": {
            "load": [1.650390625, 1.6162109375, 1.65234375],
            "mem": { "total": 17179869184u64, "free": 8190681088u64 },
            "uptime": 704891
        },
        "proc": {
            "uptime": 6,
            "mem": { "rss": 30019584, "heapTotal": 18635008, "heapUsed": 9989304 },
            "delay": 0.03084501624107361
        }
    })
}

pub fn error() -> Value {
    json!({
        "event": "error",
        "timestamp": TIMESTAMP,
        "id": "1419005623332:new-host.local:48767:i3vrb3z7:10000",
        "tags": ["user", "info"],
        "url": "http://localhost/test",
        "method": "get",
        "error": {
            "message": "Just a simple error",
            "stack": "Error: Just a simple Error"
        }
    })
}

pub fn request() -> Value {
    json!({
        "event": "request",
        "timestamp": TIMESTAMP,
        "tags": ["user", "info"],
        "data": "you made a request",
        "id": "1419005623332:new-host.local:48767:i3vrb3z7:10000",
        "method": "get",
        "path": "/"
    })
}

pub fn generic() -> Value {
    json!({
        "event": "request",
        "timestamp": TIMESTAMP,
        "tags": ["user", "info"],
        "data": "you made a default",
        "pid": 64291
    })
}

/// A tail-eligible log entry correlated to `id`.
pub fn tail_entry(id: &str, data: &str, tags: &[&str]) -> Value {
    json!({
        "event": "log",
        "timestamp": TIMESTAMP,
        "id": id,
        "tags": tags,
        "data": data
    })
}

/// A response carrying a correlation id.
pub fn response_for(id: &str) -> Value {
    let mut record = response();
    record
        .as_object_mut()
        .unwrap()
        .insert("id".to_string(), json!(id));
    record
}
