use std::rc::Rc;

use crate::router::{PageKind, PageView, Producer, ProducerFuture};

pub fn producer() -> Producer {
    Rc::new(|| -> ProducerFuture {
        Box::pin(async {
            Ok(PageView {
                kind: PageKind::Other,
                markup: r#"<div class="card notice">
                <h2>404</h2>
                <p>That page doesn't exist.</p>
            </div>"#
                    .to_string(),
            })
        })
    })
}
