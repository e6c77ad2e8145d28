pub mod systems;

pub use systems::settings_menu::{
    AddSettingsEntry, ConfigurationError, EntryDescriptor, EntryId, EntryItemsChanged,
    EntryRejected, NavigationState, OptionItem, OptionProvider, ProviderCatalog, ProviderKind,
    RemoveSettingsEntry, SettingsMenu, SettingsMenuConfig, SettingsMenuPlugin,
    SettingsPointerPlugin,
};
