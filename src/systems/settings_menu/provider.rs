use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use bevy::prelude::*;

use super::{defs::EntryId, error::ConfigurationError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Generic,
    DirectLabel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionItem {
    pub label: String,
    pub selected: bool,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, selected: bool) -> Self {
        Self {
            label: label.into(),
            selected,
        }
    }
}

pub trait OptionProvider: Send + Sync + 'static {
    fn title(&self) -> String;

    fn items(&self) -> Vec<OptionItem>;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Generic
    }

    fn direct_label(&self) -> Option<String> {
        None
    }

    fn activate(&self, index: usize);
}

pub type SharedProvider = Arc<dyn OptionProvider>;

pub struct ChoiceList {
    title: String,
    items: RwLock<Vec<OptionItem>>,
}

impl ChoiceList {
    pub fn new<L: Into<String>>(
        title: impl Into<String>,
        labels: impl IntoIterator<Item = L>,
        selected: Option<usize>,
    ) -> Self {
        let items = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| OptionItem::new(label, Some(index) == selected))
            .collect();
        Self {
            title: title.into(),
            items: RwLock::new(items),
        }
    }

    pub fn replace_items<L: Into<String>>(
        &self,
        labels: impl IntoIterator<Item = L>,
        selected: Option<usize>,
    ) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        *items = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| OptionItem::new(label, Some(index) == selected))
            .collect();
    }
}

impl OptionProvider for ChoiceList {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn items(&self) -> Vec<OptionItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn activate(&self, index: usize) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if index >= items.len() {
            return;
        }
        for (position, item) in items.iter_mut().enumerate() {
            item.selected = position == index;
        }
    }
}

/// Playback speed picker. Its items never carry a selected marker, so the
/// current rate is exposed through [`OptionProvider::direct_label`].
pub struct PlaybackRate {
    rates: Vec<f32>,
    current: RwLock<usize>,
}

impl PlaybackRate {
    pub const DEFAULT_RATES: [f32; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

    pub fn new(rates: impl Into<Vec<f32>>, current_rate: f32) -> Self {
        let rates = rates.into();
        let current = rates
            .iter()
            .position(|rate| (*rate - current_rate).abs() < f32::EPSILON)
            .unwrap_or(0);
        Self {
            rates,
            current: RwLock::new(current),
        }
    }

    pub fn current_rate(&self) -> Option<f32> {
        let current = *self.current.read().unwrap_or_else(PoisonError::into_inner);
        self.rates.get(current).copied()
    }

    fn format_rate(rate: f32) -> String {
        format!("{rate}x")
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATES, 1.0)
    }
}

impl OptionProvider for PlaybackRate {
    fn title(&self) -> String {
        String::from("Speed")
    }

    fn items(&self) -> Vec<OptionItem> {
        self.rates
            .iter()
            .map(|rate| OptionItem::new(Self::format_rate(*rate), false))
            .collect()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DirectLabel
    }

    fn direct_label(&self) -> Option<String> {
        self.current_rate().map(Self::format_rate)
    }

    fn activate(&self, index: usize) {
        if index < self.rates.len() {
            *self.current.write().unwrap_or_else(PoisonError::into_inner) = index;
        }
    }
}

pub type ProviderFactory = Arc<dyn Fn() -> SharedProvider + Send + Sync>;

#[derive(Resource, Clone, Default)]
pub struct ProviderCatalog {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderCatalog {
    pub fn player_defaults() -> Self {
        Self::default()
            .with("speed", || Arc::new(PlaybackRate::default()) as SharedProvider)
            .with("captions", || {
                Arc::new(ChoiceList::new(
                    "Captions",
                    ["Off", "English", "Español"],
                    Some(0),
                )) as SharedProvider
            })
            .with("quality", || {
                Arc::new(ChoiceList::new(
                    "Quality",
                    ["Auto", "1080p", "720p", "480p"],
                    Some(0),
                )) as SharedProvider
            })
    }

    pub fn with(
        mut self,
        kind: impl Into<String>,
        factory: impl Fn() -> SharedProvider + Send + Sync + 'static,
    ) -> Self {
        self.register(kind, factory);
        self
    }

    pub fn register(
        &mut self,
        kind: impl Into<String>,
        factory: impl Fn() -> SharedProvider + Send + Sync + 'static,
    ) -> &mut Self {
        self.factories.insert(kind.into(), Arc::new(factory));
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn resolve(&self, kind: &str) -> Result<SharedProvider, ConfigurationError> {
        self.factories
            .get(kind)
            .map(|factory| factory())
            .ok_or_else(|| ConfigurationError::UnknownProviderKind(kind.to_string()))
    }
}

impl fmt::Debug for ProviderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("ProviderCatalog").field("kinds", &kinds).finish()
    }
}

#[derive(Clone)]
pub enum EntrySource {
    Provider(SharedProvider),
    Kind(String),
}

impl EntrySource {
    pub fn resolve(&self, catalog: &ProviderCatalog) -> Result<SharedProvider, ConfigurationError> {
        match self {
            Self::Provider(provider) => Ok(Arc::clone(provider)),
            Self::Kind(kind) => catalog.resolve(kind),
        }
    }
}

impl fmt::Debug for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(provider) => f
                .debug_tuple("Provider")
                .field(&provider.title())
                .finish(),
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntryDescriptor {
    pub id: EntryId,
    pub title: Option<String>,
    pub source: EntrySource,
}

impl EntryDescriptor {
    pub fn from_kind(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            id: EntryId::new(kind.clone()),
            title: None,
            source: EntrySource::Kind(kind),
        }
    }

    pub fn with_provider(id: impl Into<EntryId>, provider: SharedProvider) -> Self {
        Self {
            id: id.into(),
            title: None,
            source: EntrySource::Provider(provider),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
