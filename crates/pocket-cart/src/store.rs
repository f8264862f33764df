//! The CartStore: in-memory cart state with write-behind persistence.
//!
//! The store owns the cart, publishes every change to subscribers through a
//! watch channel, and pushes the full item list onto a single-writer queue
//! that persists it in the background. In-memory state is always ahead of
//! (or equal to) the durable blob, never behind a stale one: the queue
//! keeps writes in the order the mutations were applied.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use pocket_cart_core::{Cart, CartChange, CartItem, Product, ProductId};
use pocket_cart_storage::{Storage, DEFAULT_CART_KEY};

use crate::error::{CartStoreError, Result};
use crate::handle::CartHandle;

/// Configuration for the cart store.
#[derive(Debug, Clone)]
pub struct CartStoreConfig {
    /// Whether to check the cart invariants on the hydrated blob.
    pub validate_on_hydrate: bool,
    /// The storage key the cart blob lives under.
    pub cart_key: String,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            validate_on_hydrate: true,
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

/// A request to the persistence writer task.
enum WriteRequest {
    /// Persist this snapshot of the item list.
    Save(Vec<CartItem>),
    /// Acknowledge once every request enqueued before this one is done.
    Flush(oneshot::Sender<()>),
}

/// State shared between the store and its handles.
#[derive(Debug)]
pub(crate) struct Shared {
    /// Current cart; send side doubles as the state lock.
    cart_tx: watch::Sender<Cart>,
    /// Queue into the persistence writer task.
    write_tx: mpsc::UnboundedSender<WriteRequest>,
}

impl Shared {
    /// Run a mutation against the current cart.
    ///
    /// The mutation is applied, published, and enqueued for persistence
    /// under the watch lock, so concurrent callers always mutate the
    /// latest snapshot and the write queue receives snapshots in exactly
    /// the order the mutations were applied. A no-op publishes nothing
    /// and persists nothing.
    pub(crate) fn apply(&self, op: impl FnOnce(&mut Cart) -> CartChange) -> CartChange {
        let mut change = CartChange::NotFound;

        self.cart_tx.send_if_modified(|cart| {
            change = op(cart);
            if !change.changed() {
                return false;
            }

            // Enqueue while still holding the lock: an unbounded send
            // never blocks, and queue order must match application order
            // or the writer could persist a stale snapshot last. The
            // writer holds the receiver for the store's lifetime; a send
            // can only fail once the store is being torn down, and then
            // there is nothing left to persist for.
            let items = cart.items().to_vec();
            tracing::debug!(?change, items = items.len(), "cart mutated");
            let _ = self.write_tx.send(WriteRequest::Save(items));
            true
        });

        change
    }
}

/// The cart store.
///
/// Owns the in-memory cart and the background persistence writer. UI
/// consumers get a [`CartHandle`] via [`CartStore::handle`]; the store
/// itself exposes the same operations for code that owns it directly.
///
/// Dropping the store detaches every handle and stops the writer after it
/// drains the queue.
#[derive(Debug)]
pub struct CartStore {
    shared: Arc<Shared>,
    writer: JoinHandle<()>,
}

impl CartStore {
    /// Open a cart store over the given storage backend.
    ///
    /// Hydrates the persisted blob once: an absent blob means an empty
    /// cart, a malformed or invariant-violating blob is an error. Spawns
    /// the persistence writer task.
    pub async fn open<S>(storage: S, config: CartStoreConfig) -> Result<Self>
    where
        S: Storage + 'static,
    {
        let cart = match storage.load_cart(&config.cart_key).await? {
            Some(items) if config.validate_on_hydrate => Cart::from_items(items)?,
            Some(items) => Cart::from_items_unchecked(items),
            None => Cart::new(),
        };
        tracing::debug!(items = cart.len(), "cart hydrated");

        let (cart_tx, _) = watch::channel(cart);
        let (write_tx, write_rx) = mpsc::unbounded_channel();

        let writer = tokio::spawn(run_writer(storage, config.cart_key, write_rx));

        Ok(Self {
            shared: Arc::new(Shared { cart_tx, write_tx }),
            writer,
        })
    }

    /// Open with the default configuration.
    pub async fn open_default<S>(storage: S) -> Result<Self>
    where
        S: Storage + 'static,
    {
        Self::open(storage, CartStoreConfig::default()).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a product to the cart.
    ///
    /// An already-present id has its quantity bumped by 1; a new id is
    /// appended with quantity 1.
    pub fn add_item(&self, product: Product) -> CartChange {
        self.shared.apply(|cart| cart.add(product))
    }

    /// Increment the quantity of the item with the given id.
    ///
    /// A missing id is a silent no-op: nothing is published or persisted.
    pub fn increment(&self, id: &ProductId) -> CartChange {
        self.shared.apply(|cart| cart.increment(id))
    }

    /// Decrement the quantity of the item with the given id.
    ///
    /// An item at quantity 1 is removed entirely. A missing id is a
    /// silent no-op.
    pub fn decrement(&self, id: &ProductId) -> CartChange {
        self.shared.apply(|cart| cart.decrement(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads and subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    /// A clone of the current cart.
    pub fn cart(&self) -> Cart {
        self.shared.cart_tx.borrow().clone()
    }

    /// The current item list.
    pub fn items(&self) -> Vec<CartItem> {
        self.shared.cart_tx.borrow().items().to_vec()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver yields the full cart after every state-changing
    /// mutation. No-op mutations do not wake subscribers.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.shared.cart_tx.subscribe()
    }

    /// Create a consumer handle.
    ///
    /// Handles are cheap to clone and hand out to UI components. They stay
    /// usable for reads after the store is dropped, but mutations through a
    /// detached handle fail immediately.
    pub fn handle(&self) -> CartHandle {
        CartHandle::new(Arc::downgrade(&self.shared), self.shared.cart_tx.subscribe())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence control
    // ─────────────────────────────────────────────────────────────────────────

    /// Wait until every persistence write enqueued so far has completed.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.shared
            .write_tx
            .send(WriteRequest::Flush(ack_tx))
            .map_err(|_| CartStoreError::Closed)?;
        ack_rx.await.map_err(|_| CartStoreError::Closed)
    }

    /// Flush outstanding writes and shut the store down.
    ///
    /// Every handle becomes detached. Returns an error if the writer task
    /// panicked at some point.
    pub async fn close(self) -> Result<()> {
        let Self { shared, writer } = self;
        // Dropping the last strong reference closes the write queue; the
        // writer drains what is left and exits.
        drop(shared);
        writer.await.map_err(|_| CartStoreError::Closed)
    }
}

/// The persistence writer: drains the queue, one write at a time.
///
/// A failed write is logged and skipped; the next snapshot supersedes it
/// anyway, and in-memory state stays authoritative.
async fn run_writer<S: Storage>(
    storage: S,
    key: String,
    mut write_rx: mpsc::UnboundedReceiver<WriteRequest>,
) {
    while let Some(request) = write_rx.recv().await {
        match request {
            WriteRequest::Save(items) => {
                if let Err(e) = storage.save_cart(&key, &items).await {
                    tracing::warn!(error = %e, "cart persistence write failed");
                }
            }
            WriteRequest::Flush(ack) => {
                // Queue order means everything enqueued before this flush
                // has already been written.
                let _ = ack.send(());
            }
        }
    }
}
